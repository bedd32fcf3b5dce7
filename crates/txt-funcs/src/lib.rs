//! Template functions for `txt`.
//!
//! Functions live in an explicit [`Registry`]: each entry has a name, an
//! [`Arity`] and a body taking `&[serde_json::Value]`. [`standard`] builds the
//! whole table from a [`LibraryContext`], which carries the shared regex cache,
//! the run's split defaults and the environment and process seams.
//!
//! ```rust
//! use std::sync::Arc;
//! use serde_json::json;
//! use txt_funcs::{standard, LibraryContext};
//! use txt_ingest::RegexCache;
//!
//! let registry = standard(&LibraryContext::new(Arc::new(RegexCache::new())));
//!
//! assert_eq!(registry.call("slice", &[json!("hello"), json!(-3)]).unwrap(), json!("llo"));
//! assert_eq!(registry.call("quoteCSV", &[json!("a,b")]).unwrap(), json!("\"a,b\""));
//! ```

pub mod env;
mod error;
mod input;
mod library;
mod pattern;
mod process;
mod quote;
mod registry;
pub mod slice;
mod strings;

pub use env::{EnvReader, MockEnv, RealEnv};
pub use error::FuncError;
pub use library::{standard, LibraryContext};
pub use quote::{quote_ascii, quote_csv, quote_string};
pub use registry::{Arity, Entry, Function, Registry};
pub use slice::{bounds, slice, SliceError};
