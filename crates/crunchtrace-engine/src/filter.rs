use serde::{Deserialize, Serialize};

/// Decides whether occurrences raised in a source file are traced at all.
///
/// Must be pure: the processor asks once per occurrence and may ask again for
/// the same file many times.
pub trait FileFilter {
    fn should_trace(&self, file_path: &str) -> bool;
}

impl<F> FileFilter for F
where
    F: Fn(&str) -> bool,
{
    fn should_trace(&self, file_path: &str) -> bool {
        self(file_path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TraceEverything;

impl FileFilter for TraceEverything {
    fn should_trace(&self, _file_path: &str) -> bool {
        true
    }
}

/// Path based filter loaded from configuration.
///
/// A file is traced when it lies under one of `include_roots` (or the list is
/// empty) and contains none of the `exclude` fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFilter {
    #[serde(default)]
    pub include_roots: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl PathFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_root(mut self, root: impl Into<String>) -> Self {
        self.include_roots.push(root.into());
        self
    }

    pub fn exclude(mut self, fragment: impl Into<String>) -> Self {
        self.exclude.push(fragment.into());
        self
    }
}

impl FileFilter for PathFilter {
    fn should_trace(&self, file_path: &str) -> bool {
        let included = self.include_roots.is_empty()
            || self
                .include_roots
                .iter()
                .any(|root| file_path.starts_with(root.as_str()));

        included
            && !self
                .exclude
                .iter()
                .any(|fragment| file_path.contains(fragment.as_str()))
    }
}
