#![allow(dead_code)]
pub mod error;
pub mod matrix;
pub mod minimize;
pub mod prelude;

/// Create a **[`Matrix`](crate::matrix::Matrix)** from nested row literals.
///
/// ```
/// use optkit::matrix;
/// let a = matrix![[1.0, 2.0],
///                 [3.0, 4.0]];
///
/// assert_eq!(a.dim(), (2, 2));
/// ```
///
/// This macro uses `vec![]`, and has the same ownership semantics;
/// elements are moved into the resulting matrix. Rows of unequal length
/// panic; use `Matrix::from_rows` for the fallible path.
///
#[macro_export]
macro_rules! matrix {
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::matrix::Matrix::from_rows(vec![$(vec![$($x,)*],)*])
            .expect("matrix! rows must have equal length")
    }};
}
