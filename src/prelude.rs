//! optkit prelude.
//!
//! This module contains the most used types, traits and functions that you
//! can import easily as a group.
//!
//! ```
//! use optkit::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::{MatrixError, MinimizerError};

#[doc(no_inline)]
pub use crate::matrix::Matrix;

#[doc(no_inline)]
pub use crate::minimize::{ConjGrad, ConjGradResult, GradPairFn, NumGradFn, ObjGradFn};
