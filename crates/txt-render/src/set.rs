//! The templates of one run: inline and file-based, with one main template.
//!
//! Files are named by their basename, so `{% include "row.tmpl" %}` finds
//! `./templates/row.tmpl` however it was given on the command line. A file
//! whose first line starts with `#!` has that line removed, which lets a
//! template be an executable script.

use std::fs;
use std::path::Path;

use crate::engine::TemplateEngine;
use crate::error::RenderError;

/// Name of the template given inline with `-e`.
pub const INLINE_TEMPLATE_NAME: &str = "-e";

/// An ordered set of named templates.
///
/// The first template added is the main one unless [`TemplateSet::set_main`]
/// picks another. Adding a name twice replaces the earlier source.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: Vec<(String, String)>,
    main: Option<String>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template from a string.
    pub fn add_inline(&mut self, name: impl Into<String>, source: impl Into<String>) {
        let name = name.into();
        let source = source.into();
        if self.main.is_none() {
            self.main = Some(name.clone());
        }
        match self.templates.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = source,
            None => self.templates.push((name, source)),
        }
    }

    /// Reads a template file and adds it under its basename.
    ///
    /// # Errors
    ///
    /// [`RenderError::IoError`] naming the path if it cannot be read.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| RenderError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let name = template_name(path);
        tracing::debug!(name = %name, path = %path.display(), "loaded template");
        self.add_inline(name, strip_shebang(&source));
        Ok(())
    }

    /// Makes `name` the main template.
    pub fn set_main(&mut self, name: &str) -> Result<(), RenderError> {
        if !self.contains(name) {
            return Err(RenderError::TemplateNotFound(name.to_string()));
        }
        self.main = Some(name.to_string());
        Ok(())
    }

    /// Name of the main template.
    pub fn main(&self) -> Result<&str, RenderError> {
        self.main.as_deref().ok_or(RenderError::NoTemplate)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registers every template with `engine`.
    pub fn load_into(&self, engine: &mut dyn TemplateEngine) -> Result<(), RenderError> {
        for (name, source) in &self.templates {
            engine.add_template(name, source)?;
        }
        Ok(())
    }

    /// Loads the set into `engine` and renders the main template against `dot`.
    pub fn render(
        &self,
        engine: &mut dyn TemplateEngine,
        dot: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let main = self.main()?;
        self.load_into(engine)?;
        engine.render_named(main, dot)
    }
}

/// The name a template file is registered under.
pub fn template_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Drops a leading `#!` line.
pub fn strip_shebang(source: &str) -> &str {
    if !source.starts_with("#!") {
        return source;
    }
    match source.find('\n') {
        Some(end) => &source[end + 1..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MiniJinjaEngine;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_shebang_is_stripped() {
        assert_eq!(strip_shebang("#!/usr/bin/env txt\nbody\n"), "body\n");
        assert_eq!(strip_shebang("#!only"), "");
        assert_eq!(strip_shebang("body #!\n"), "body #!\n");
        assert_eq!(strip_shebang(""), "");
    }

    #[test]
    fn test_first_template_is_main() {
        let mut set = TemplateSet::new();
        assert!(matches!(set.main(), Err(RenderError::NoTemplate)));
        set.add_inline("a", "A");
        set.add_inline("b", "B");
        assert_eq!(set.main().unwrap(), "a");
        set.set_main("b").unwrap();
        assert_eq!(set.main().unwrap(), "b");
        assert!(matches!(
            set.set_main("c"),
            Err(RenderError::TemplateNotFound(ref n)) if n == "c"
        ));
    }

    #[test]
    fn test_same_name_replaces_source() {
        let mut set = TemplateSet::new();
        set.add_inline("a", "one");
        set.add_inline("a", "two");
        assert_eq!(set.len(), 1);
        let mut engine = MiniJinjaEngine::new();
        assert_eq!(set.render(&mut engine, &json!(null)).unwrap(), "two");
    }

    #[test]
    fn test_files_are_named_by_basename() {
        let dir = TempDir::new().unwrap();
        let main = dir.path().join("main.tmpl");
        let row = dir.path().join("row.tmpl");
        fs::write(&main, "#!/usr/bin/env txt\n{% for r in dot %}{% include \"row.tmpl\" %}{% endfor %}").unwrap();
        fs::write(&row, "<{{ r }}>").unwrap();

        let mut set = TemplateSet::new();
        set.add_file(&main).unwrap();
        set.add_file(&row).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["main.tmpl", "row.tmpl"]);

        let mut engine = MiniJinjaEngine::new();
        assert_eq!(set.render(&mut engine, &json!([1, 2])).unwrap(), "<1><2>");
    }

    #[test]
    fn test_missing_file_names_path() {
        let mut set = TemplateSet::new();
        let err = set.add_file("/no/such/dir/t.tmpl").unwrap_err();
        assert!(err.to_string().contains("/no/such/dir/t.tmpl"));
        assert!(set.is_empty());
    }
}
