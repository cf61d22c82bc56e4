//! A clean-css optimizer that returns futures.
//!
//! [`CleanCssAsync`] wraps a callback-style optimizer ([`CleanCss`] by
//! default, built on `lightningcss`) and turns every call to
//! [`minify`](CleanCssAsync::minify) into a [`Minification`] future. Errors
//! *and* warnings reported while optimizing reject that future: CSS that
//! clean-css had to skip or rewrite is treated as a failure.
//!
//! Arguments are passed as [`Value`]s and checked before anything is
//! optimized, so malformed calls fail immediately instead of producing a
//! future that never settles.
//!
//! ```
//! use clean_css_async::{CleanCssAsync, ErrorKind, Map, Value};
//!
//! let options = Value::Map(Map::from([("level".into(), Value::I64(2))]));
//! let clean_css = CleanCssAsync::new(Some(options))?;
//!
//! let error = clean_css.minify(&[]).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::MissingArguments);
//! # Ok::<(), clean_css_async::Error>(())
//! ```

#![warn(missing_docs)]

pub mod clean_css;
pub mod error;
pub mod minify;
mod options;
pub mod util;

pub use clean_css::{CleanCss, Minified, Optimize};
pub use error::{Error, ErrorKind};
pub use minify::{CleanCssAsync, Minification};
pub use util::value::{Map, Value};
