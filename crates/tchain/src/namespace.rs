//! template name normalization
//!
//! A fully-qualified template name carries the namespace of the layer that
//! owns it: `@<namespace>/<logical name>`.
use std::path::{Component, Path};

const NAMESPACE_MARKER: char = '@';

/// Namespace of a layer (shop, vendor) or of a single theme/module
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_new::new)]
pub struct Namespace(String);

impl Namespace {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Qualify `name` with this namespace
    ///
    /// A name that already carries this namespace is returned unchanged.
    pub fn fill_namespace(&self, name: &str) -> Result<String, TemplateNameError> {
        let parsed = TemplateName::parse(name)?;

        if let Some(namespace) = parsed.namespace {
            if namespace != self.0 {
                return Err(TemplateNameError::NamespaceMismatch {
                    name: name.to_owned(),
                    expected: self.0.clone(),
                });
            }
        }

        Ok(format!("{NAMESPACE_MARKER}{}/{}", self.0, parsed.name))
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Namespace(value.to_owned())
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A template name split into its optional namespace and logical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateName<'a> {
    pub namespace: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> TemplateName<'a> {
    /// Parse `page.html` or `@namespace/page.html`
    pub fn parse(raw: &'a str) -> Result<Self, TemplateNameError> {
        let raw_trimmed = raw.trim();
        if raw_trimmed.is_empty() {
            return Err(TemplateNameError::Empty);
        }

        let (namespace, name) = match raw_trimmed.strip_prefix(NAMESPACE_MARKER) {
            Some(qualified) => {
                let Some((namespace, name)) = qualified.split_once('/') else {
                    return Err(TemplateNameError::malformed(raw, "namespace without template name"));
                };
                if namespace.is_empty() {
                    return Err(TemplateNameError::malformed(raw, "empty namespace"));
                }
                (Some(namespace), name)
            }
            None => (None, raw_trimmed),
        };

        if name.is_empty() {
            return Err(TemplateNameError::Empty);
        }

        for component in Path::new(name).components() {
            match component {
                Component::Normal(_) => {}
                Component::CurDir => {
                    return Err(TemplateNameError::malformed(raw, "current directory segment"))
                }
                Component::ParentDir => {
                    return Err(TemplateNameError::malformed(raw, "parent directory segment"))
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(TemplateNameError::malformed(raw, "absolute path"))
                }
            }
        }

        // `Path::components` folds `a/./b` and `a//b` into `a/b`
        for segment in name.split('/') {
            match segment {
                "" => return Err(TemplateNameError::malformed(raw, "empty path segment")),
                "." => {
                    return Err(TemplateNameError::malformed(raw, "current directory segment"))
                }
                _ => {}
            }
        }

        Ok(Self { namespace, name })
    }

    pub fn is_qualified(&self) -> bool {
        self.namespace.is_some()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TemplateNameError {
    #[error("template name is empty")]
    Empty,
    #[error("template name {name:?} is malformed: {reason}")]
    Malformed { name: String, reason: &'static str },
    #[error("template name {name:?} does not belong to namespace {expected:?}")]
    NamespaceMismatch { name: String, expected: String },
}

impl TemplateNameError {
    fn malformed(name: &str, reason: &'static str) -> Self {
        Self::Malformed {
            name: name.to_owned(),
            reason,
        }
    }
}
