#![allow(dead_code)]
#![allow(unused_assignments)]
use crate::error::MinimizerError;
use crate::matrix::Matrix;
use crate::minimize::ObjGradFn;
use std::fmt;

/// Result of a conjugate gradient run
#[derive(Debug, Clone)]
pub struct ConjGradResult {
    pub xmin: Matrix,
    pub fmin: f64,
    /// Accepted cost values, one per successful line search
    pub cost_history: Vec<f64>,
    /// Line searches performed
    pub iters: usize,
    /// Objective function evaluations, including the initial one
    pub fn_evals: usize,
}

#[derive(Clone)]
pub struct ConjGrad {
    xmin: Matrix,
    fmin: f64,
    f: Box<dyn ObjGradFn>,
    iters: usize,
}

impl ConjGrad {
    /// Sufficient-decrease coefficient of the Wolfe-Powell test
    const RHO: f64 = 0.01;
    /// Curvature coefficient of the Wolfe-Powell test
    const SIG: f64 = 0.5;
    /// Minimum fractional distance from a bracket endpoint
    const INT: f64 = 0.1;
    /// Maximum extrapolation multiple of the current step
    const EXT: f64 = 3.0;
    /// Maximum step-length growth ratio between successive line searches
    const RATIO: f64 = 100.0;
    /// Maximum function evaluations per line search
    const MAX_EVALS: usize = 20;

    pub fn new<F>(f: F) -> Self
    where
        F: ObjGradFn + 'static,
    {
        ConjGrad {
            xmin: Matrix::zeros(0, 0),
            fmin: 0.0,
            f: Box::new(f),
            iters: 0,
        }
    }

    pub fn new_boxed(f: Box<dyn ObjGradFn>) -> Self {
        ConjGrad {
            xmin: Matrix::zeros(0, 0),
            fmin: 0.0,
            f,
            iters: 0,
        }
    }

    fn eval_checked(&self, x: &Matrix, n: usize) -> Result<(f64, Matrix), MinimizerError> {
        let (f, df) = self.f.eval(x);
        if df.len() != n {
            return Err(MinimizerError::GradientEvaluationError);
        }
        Ok((f, df))
    }

    /// Minimize the objective with Polack-Ribiere conjugate gradients
    ///
    /// The line search satisfies the Wolfe-Powell conditions using quadratic
    /// and cubic polynomial interpolation and cubic extrapolation, with
    /// bisection fallbacks when a fit is non-finite. The slope ratio of the
    /// previous line search guesses the initial step of the next one.
    ///
    /// A positive `budget` caps the number of line searches; a negative
    /// `budget` caps the number of function evaluations at `abs(budget)`.
    /// A zero `budget` returns `x0` untouched without evaluating anything.
    ///
    /// Non-finite costs or interpolation results are handled internally and
    /// never surface as errors. Two consecutive line-search failures end the
    /// run early with the best point found so far; callers can compare the
    /// result counts against the budget to tell the two outcomes apart.
    ///
    /// # Arguments
    /// * `x0` - Starting point; any nonempty matrix shape, treated as a flat
    ///   parameter vector
    /// * `budget` - Search budget; sign selects the unit as described above
    ///
    /// # Returns
    /// * `ConjGradResult` with the refined point, final cost, accepted-cost
    ///   history and counters
    /// * `Err` only for caller mistakes: an empty `x0`, or a gradient whose
    ///   length disagrees with `x0`
    pub fn minimize(&mut self, x0: Matrix, budget: i32) -> Result<ConjGradResult, MinimizerError> {
        if x0.is_empty() {
            return Err(MinimizerError::InvalidDimension);
        }
        if budget == 0 {
            self.xmin = x0.clone();
            self.fmin = f64::NAN;
            self.iters = 0;
            return Ok(ConjGradResult {
                xmin: x0,
                fmin: f64::NAN,
                cost_history: Vec::new(),
                iters: 0,
                fn_evals: 0,
            });
        }

        let n = x0.len();
        let cap = budget.unsigned_abs() as usize;
        let count_evals = budget < 0;

        let mut x = x0;
        let mut fx: Vec<f64> = Vec::new();
        let mut iters: usize = 0;
        let mut fn_evals: usize = 0;
        let mut ls_failed = false;

        let (mut f1, mut df1) = self.eval_checked(&x, n)?;
        fn_evals += 1;

        let mut s = df1.neg();
        let mut d1 = -s.dot(&s)?;
        // expected first-step reduction is fixed at 1.0
        let mut z1 = 1.0 / (1.0 - d1);

        loop {
            let used = if count_evals { fn_evals } else { iters };
            if used >= cap {
                break;
            }
            iters += 1;

            // snapshot the accepted state in case this line search fails
            let x_snap = x.clone();
            let f0 = f1;
            let df0 = df1.clone();

            x = x.add(&s.mul_scalar(z1))?;
            let (nf2, ndf2) = self.eval_checked(&x, n)?;
            fn_evals += 1;
            let (mut f2, mut df2) = (nf2, ndf2);
            let mut d2 = df2.dot(&s)?;

            let (mut f3, mut d3, mut z3) = (f1, d1, -z1);
            let mut m = if count_evals {
                Self::MAX_EVALS.min(cap.saturating_sub(fn_evals))
            } else {
                Self::MAX_EVALS
            };
            let mut success = false;
            let mut limit = -1.0; // negative while no bracket limit is known

            loop {
                while ((f2 > f1 + z1 * Self::RHO * d1) || (d2 > -Self::SIG * d1)) && m > 0 {
                    limit = z1;
                    let mut z2 = if f2 > f1 {
                        // quadratic fit
                        z3 - (0.5 * d3 * z3 * z3) / (d3 * z3 + f2 - f3)
                    } else {
                        // cubic fit
                        let a = 6.0 * (f2 - f3) / z3 + 3.0 * (d2 + d3);
                        let b = 3.0 * (f3 - f2) - z3 * (d3 + 2.0 * d2);
                        ((b * b - a * d2 * z3 * z3).sqrt() - b) / a
                    };
                    if !z2.is_finite() {
                        // bisect on a failed fit
                        z2 = z3 / 2.0;
                    }
                    // keep at least INT away from either bracket endpoint
                    z2 = z2.min(Self::INT * z3).max((1.0 - Self::INT) * z3);
                    z1 += z2;
                    x = x.add(&s.mul_scalar(z2))?;
                    let (nf2, ndf2) = self.eval_checked(&x, n)?;
                    fn_evals += 1;
                    f2 = nf2;
                    df2 = ndf2;
                    m -= 1;
                    d2 = df2.dot(&s)?;
                    z3 -= z2;
                }
                if f2 > f1 + z1 * Self::RHO * d1 || d2 > -Self::SIG * d1 {
                    break; // line search failed
                } else if d2 > Self::SIG * d1 {
                    success = true;
                    break;
                } else if m == 0 {
                    break;
                }
                // cubic extrapolation
                let a = 6.0 * (f2 - f3) / z3 + 3.0 * (d2 + d3);
                let b = 3.0 * (f3 - f2) - z3 * (d3 + 2.0 * d2);
                let mut z2 = -d2 * z3 * z3 / (b + (b * b - a * d2 * z3 * z3).sqrt());
                if !z2.is_finite() || z2 < 0.0 {
                    if limit < -0.5 {
                        z2 = z1 * (Self::EXT - 1.0);
                    } else {
                        z2 = (limit - z1) / 2.0;
                    }
                } else if limit > -0.5 && z2 + z1 > limit {
                    z2 = (limit - z1) / 2.0;
                } else if limit < -0.5 && z2 + z1 > z1 * Self::EXT {
                    z2 = z1 * (Self::EXT - 1.0);
                } else if z2 < -z3 * Self::INT {
                    z2 = -z3 * Self::INT;
                } else if limit > -0.5 && z2 < (limit - z1) * (1.0 - Self::INT) {
                    z2 = (limit - z1) * (1.0 - Self::INT);
                }
                f3 = f2;
                d3 = d2;
                z3 = -z2;
                z1 += z2;
                x = x.add(&s.mul_scalar(z2))?;
                let (nf2, ndf2) = self.eval_checked(&x, n)?;
                fn_evals += 1;
                f2 = nf2;
                df2 = ndf2;
                m -= 1;
                d2 = df2.dot(&s)?;
            }

            if success {
                f1 = f2;
                fx.push(f1);
                // Polack-Ribiere direction update
                let beta = (df2.dot(&df2)? - df1.dot(&df2)?) / df1.dot(&df1)?;
                s = s.mul_scalar(beta).sub(&df2)?;
                std::mem::swap(&mut df1, &mut df2);
                d2 = df1.dot(&s)?;
                if d2 > 0.0 {
                    // numerical drift left a non-descent direction, restart
                    s = df1.neg();
                    d2 = -s.dot(&s)?;
                }
                z1 *= Self::RATIO.min(d1 / (d2 - f64::MIN_POSITIVE));
                d1 = d2;
                ls_failed = false;
            } else {
                x = x_snap;
                f1 = f0;
                df1 = df0;
                let used = if count_evals { fn_evals } else { iters };
                if ls_failed || used > cap {
                    break; // two consecutive failures or out of budget
                }
                std::mem::swap(&mut df1, &mut df2);
                s = df1.neg();
                d1 = -s.dot(&s)?;
                z1 = 1.0 / (1.0 - d1);
                ls_failed = true;
            }
        }

        self.xmin = x.clone();
        self.fmin = f1;
        self.iters = iters;
        Ok(ConjGradResult {
            xmin: x,
            fmin: f1,
            cost_history: fx,
            iters,
            fn_evals,
        })
    }
}

impl fmt::Debug for ConjGrad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConjGrad( xmin: {:?}, fmin: {}, iters: {} )",
            self.xmin, self.fmin, self.iters
        )
    }
}
