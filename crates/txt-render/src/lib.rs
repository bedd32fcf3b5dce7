//! Template rendering for `txt`.
//!
//! - [`TemplateEngine`]: the seam the binary renders through.
//! - [`MiniJinjaEngine`]: the implementation, with the `txt-funcs` registry
//!   installed as global functions and the root value bound as `dot`.
//! - [`TemplateSet`]: the templates of one run, named by file basename, with
//!   one main template.

mod engine;
mod error;
mod set;

pub use engine::{MiniJinjaEngine, TemplateEngine, DOT};
pub use error::RenderError;
pub use set::{strip_shebang, template_name, TemplateSet, INLINE_TEMPLATE_NAME};
