//! a single candidate location for a logical template
use std::path::{Path, PathBuf};

/// Customization tier that supplied a [TemplateType]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Shop specific overrides
    Shop,
    /// The active theme or one of its ancestors
    Theme,
    /// An installed module
    Module,
    /// The vendor default
    Vendor,
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Shop => f.write_str("shop"),
            Layer::Theme => f.write_str("theme"),
            Layer::Module => f.write_str("module"),
            Layer::Vendor => f.write_str("vendor"),
        }
    }
}

/// One concrete candidate for a logical template
///
/// Identity is the fully-qualified name: two values with the same
/// `fully_qualified_name` describe the same chain entry even if they point to
/// different directories.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateType {
    fully_qualified_name: String,
    name: String,
    namespace: String,
    layer: Layer,
    directory: PathBuf,
}

impl TemplateType {
    pub fn new(
        fully_qualified_name: impl Into<String>,
        name: impl Into<String>,
        namespace: impl Into<String>,
        layer: Layer,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fully_qualified_name: fully_qualified_name.into(),
            name: name.into(),
            namespace: namespace.into(),
            layer,
            directory: directory.into(),
        }
    }

    /// Namespace-qualified name, e.g. `@flow/page/checkout.html`
    pub fn fully_qualified_name(&self) -> &str {
        &self.fully_qualified_name
    }

    /// Logical name without namespace, e.g. `page/checkout.html`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Physical location of the template file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }
}

impl std::fmt::Display for TemplateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.fully_qualified_name)
    }
}
