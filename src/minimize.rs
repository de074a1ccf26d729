#![allow(dead_code)]
use crate::matrix::Matrix;
use dyn_clone::DynClone;

pub mod conjugate_gradient;

pub use self::conjugate_gradient::{ConjGrad, ConjGradResult};

/// Objective function evaluated by the minimizers.
///
/// One call produces both the cost and the gradient at `x`, and counts as a
/// single function evaluation for budget accounting. The gradient must have
/// the same shape as `x`.
pub trait ObjGradFn: DynClone {
    fn eval(&self, x: &Matrix) -> (f64, Matrix);
}
dyn_clone::clone_trait_object!(ObjGradFn);

impl<F> ObjGradFn for F
where
    F: Fn(&Matrix) -> (f64, Matrix) + DynClone,
{
    fn eval(&self, x: &Matrix) -> (f64, Matrix) {
        self(x)
    }
}

// Wrapper pairing separate cost and gradient closures
#[derive(Clone)]
pub struct GradPairFn<F, GF>(pub F, pub GF)
where
    F: Fn(&Matrix) -> f64 + Clone,
    GF: Fn(&Matrix) -> Matrix + Clone;

// Convenience constructors
impl<F, GF> GradPairFn<F, GF>
where
    F: Fn(&Matrix) -> f64 + Clone,
    GF: Fn(&Matrix) -> Matrix + Clone,
{
    pub fn new(f: F, gf: GF) -> Self {
        GradPairFn(f, gf)
    }
}

impl<F, GF> ObjGradFn for GradPairFn<F, GF>
where
    F: Fn(&Matrix) -> f64 + Clone,
    GF: Fn(&Matrix) -> Matrix + Clone,
{
    fn eval(&self, x: &Matrix) -> (f64, Matrix) {
        ((self.0)(x), (self.1)(x))
    }
}

// Wrapper deriving a central-difference gradient from a cost closure
#[derive(Clone)]
pub struct NumGradFn<F>
where
    F: Fn(&Matrix) -> f64 + Clone,
{
    f: F,
    step: f64,
}

impl<F> NumGradFn<F>
where
    F: Fn(&Matrix) -> f64 + Clone,
{
    pub fn new(f: F, step: Option<f64>) -> Self {
        Self {
            f,
            step: step.unwrap_or(1e-6),
        }
    }

    pub fn numerical_gradient(&self, x: &Matrix) -> Matrix {
        let (rows, cols) = x.dim();
        let mut grad = Matrix::zeros(rows, cols);
        for ((i, j), g) in grad.0.indexed_iter_mut() {
            let mut plus = x.clone();
            let mut minus = x.clone();
            plus.0[(i, j)] += self.step;
            minus.0[(i, j)] -= self.step;
            *g = ((self.f)(&plus) - (self.f)(&minus)) / (2.0 * self.step);
        }
        grad
    }
}

impl<F> ObjGradFn for NumGradFn<F>
where
    F: Fn(&Matrix) -> f64 + Clone,
{
    fn eval(&self, x: &Matrix) -> (f64, Matrix) {
        ((self.f)(x), self.numerical_gradient(x))
    }
}
