//! entry point for a template engine
//!
//! The engine asks for a template by name and gets the source of the most
//! specific candidate. When that template wants to render the version it
//! overrides it asks for the parent of its own fully-qualified name.
use crate::chain::NavigationError;
use crate::resolver::{ChainResolver, ResolveError};
use crate::template_type::TemplateType;
use std::path::PathBuf;

/// A chain entry together with its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
    pub template: TemplateType,
    pub source: String,
}

#[derive(Debug, derive_new::new)]
pub struct TemplateLoader {
    resolver: ChainResolver,
}

impl TemplateLoader {
    pub fn resolver(&self) -> &ChainResolver {
        &self.resolver
    }

    /// Source of the most specific candidate for `name`
    pub fn load(&self, name: &str) -> Result<LoadedTemplate, LoadError> {
        let chain = self.resolver.require(name)?;
        let template = chain.last_child()?;
        self.read(template)
    }

    /// Source of the template overridden by `current`
    ///
    /// `current` is the fully-qualified name of the requesting template, e.g.
    /// `@shop/page.html`. Fails when `current` is not a candidate for its
    /// logical name or when it is already the least specific one.
    pub fn load_parent(&self, current: &str) -> Result<LoadedTemplate, LoadError> {
        let chain = self.resolver.require(current)?;
        let current = chain
            .get(current.trim())
            .ok_or_else(|| NavigationError::NotInChain {
                name: current.to_owned(),
            })?;

        let parent = chain.parent(current)?;
        tracing::debug!(template=%current, %parent, "rendering parent template");
        self.read(parent)
    }

    /// `true` if any layer provides `name`
    pub fn exists(&self, name: &str) -> Result<bool, LoadError> {
        Ok(!self.resolver.resolve(name)?.is_empty())
    }

    /// `true` if a more specific version shadows another candidate
    pub fn has_override(&self, name: &str) -> Result<bool, LoadError> {
        let chain = self.resolver.resolve(name)?;
        match chain.last_child() {
            Ok(most_specific) => Ok(chain.has_parent(most_specific)?),
            Err(NavigationError::EmptyChain) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn read(&self, template: &TemplateType) -> Result<LoadedTemplate, LoadError> {
        let path = self
            .resolver
            .file_system()
            .join(template.directory(), template.name());
        tracing::debug!(%template, path=%path.display(), "reading template");

        let source = self
            .resolver
            .file_system()
            .read_to_string(&path)
            .map_err(|source| LoadError::ReadFailed {
                path: path.clone(),
                source,
            })?;

        Ok(LoadedTemplate {
            template: template.clone(),
            source,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("Unable to read template {}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}
