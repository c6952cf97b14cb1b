//! # Stylesets
//!
//! Per-shop themes: a set of CSS custom-property values plus free-form CSS,
//! compiled into one stylesheet.
//!
//! - `variables`: defaults and override merging
//! - `definition`: the `StylesetDefinition` trait and built-in families
//! - `factory`: registry resolving a shop to a family by keywords
//! - `validator`: safety and syntax checks for user CSS and variable values
//! - `compiler` / `minify`: stylesheet assembly and per-shop caching (`cache`)
//!
//! ## Key Invariants
//!
//! - Compiled CSS is a pure function of definition, options and base rules
//! - Each variable is declared once, override values winning over defaults
//! - CSS problems are reported in a `ValidationReport`, never as `Err`

pub mod cache;
pub mod compiler;
pub mod definition;
pub mod factory;
pub mod minify;
pub mod validator;
pub mod variables;

pub use cache::{MemoryCache, StylesetCache};
pub use compiler::{CompileOptions, StylesetCompiler, compile_variables};
pub use definition::{
    ApparelStyleset, CosmeticsStyleset, FoodStyleset, StoredStyleset, StylesetDefinition,
    StylesetSource, WholesaleStyleset,
};
pub use factory::{DEFAULT_STYLESET_KEY, StylesetFactory};
pub use minify::minify;
pub use validator::{StylesetValidator, ValidationReport};
pub use variables::{DEFAULT_VARIABLES, StylesetVariables};
