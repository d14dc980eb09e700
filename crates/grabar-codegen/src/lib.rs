//! Typed wait and assertion code generation for recorded Playwright scripts.
//!
//! Users insert waits and assertions while recording. Instead of splicing
//! dialog values into string templates, a payload is validated into a typed
//! [`Step`] and then rendered by a pure, exhaustive formatter:
//!
//! ```
//! use grabar_codegen::prelude::*;
//!
//! let step = StepBuilder::new("toHaveText")
//!     .selector("h1")
//!     .param("text", "Welcome")
//!     .build()
//!     .unwrap();
//! assert_eq!(render(&step), "await expect(page.locator('h1')).toHaveText('Welcome');");
//! ```

pub mod builder;
pub mod catalog;
pub mod codegen;
pub mod error;
pub mod hir;

pub use builder::{canonical_kind, Params, StepBuilder};
pub use catalog::{catalog, CatalogEntry, Category, Family, ParamSpec, ParamType};
pub use codegen::{locator_expr, quote, render};
pub use error::{CodegenError, Result};
pub use hir::{Assertion, Expectation, LoadState, Step, Target, TextPattern, WaitStep, WaitUntil};

/// Convenient imports for building and rendering steps
pub mod prelude {
    pub use crate::builder::{Params, StepBuilder};
    pub use crate::catalog::{catalog, Category, Family};
    pub use crate::codegen::{locator_expr, pattern, quote, render};
    pub use crate::error::{CodegenError, Result};
    pub use crate::hir::{
        Assertion, Expectation, LoadState, Step, Target, TextPattern, WaitStep, WaitUntil,
    };
}
