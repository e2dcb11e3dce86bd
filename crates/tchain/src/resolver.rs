//! composes the layer providers into one [TemplateChain]
use crate::chain::TemplateChain;
use crate::config::{ConfigError, LayerConfig};
use crate::fs::FileSystem;
use crate::layer::{ChainProvider, DirectoryLayer, ModuleLayer, TemplateSource, ThemeLayer};
use crate::namespace::{Namespace, TemplateName, TemplateNameError};

/// Resolves logical template names across all layers
///
/// Providers are queried in the order they were given, most specific layer
/// first. The order is fixed for the lifetime of the resolver.
pub struct ChainResolver {
    providers: Vec<Box<dyn ChainProvider>>,
    fs: Box<dyn FileSystem>,
}

impl ChainResolver {
    pub fn new(providers: Vec<Box<dyn ChainProvider>>, fs: impl FileSystem + 'static) -> Self {
        Self {
            providers,
            fs: Box::new(fs),
        }
    }

    /// Shop, active theme lineage, modules, vendor
    ///
    /// Layers without directories are left out. Ids clashing with another
    /// layer's namespace are rejected.
    pub fn from_config(
        config: &LayerConfig,
        fs: impl FileSystem + 'static,
    ) -> Result<Self, ConfigError> {
        config.check_namespaces()?;

        let mut providers: Vec<Box<dyn ChainProvider>> = vec![];

        if let Some(shop) = config.shop.as_ref().filter(|s| !s.directories.is_empty()) {
            providers.push(Box::new(DirectoryLayer::shop(shop.directories.clone())));
        }

        let lineage: Vec<TemplateSource> = config
            .theme_lineage()?
            .into_iter()
            .map(|(id, theme)| TemplateSource::new(Namespace::from(id), theme.directories.clone()))
            .collect();
        if !lineage.is_empty() {
            providers.push(Box::new(ThemeLayer::new(lineage)));
        }

        let modules: Vec<TemplateSource> = config
            .modules
            .iter()
            .map(|(id, module)| {
                TemplateSource::new(Namespace::new(id.clone()), module.directories.clone())
            })
            .collect();
        if !modules.is_empty() {
            providers.push(Box::new(ModuleLayer::new(modules)));
        }

        if let Some(vendor) = config.vendor.as_ref().filter(|v| !v.directories.is_empty()) {
            providers.push(Box::new(DirectoryLayer::vendor(vendor.directories.clone())));
        }

        tracing::debug!(
            layers = ?providers.iter().map(|p| p.layer()).collect::<Vec<_>>(),
            "resolver configured"
        );

        Ok(Self::new(providers, fs))
    }

    pub fn providers(&self) -> &[Box<dyn ChainProvider>] {
        &self.providers
    }

    pub fn file_system(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// All candidates for `name`, most specific first
    ///
    /// A qualified name (`@ns/page.html`) is resolved by its logical part.
    /// When no layer has the template the chain is empty.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve(&self, name: &str) -> Result<TemplateChain, ResolveError> {
        let logical_name = TemplateName::parse(name)?.name;

        let mut chain = TemplateChain::new();
        for provider in &self.providers {
            let partial = provider.chain(logical_name, self.fs.as_ref())?;
            tracing::trace!(layer=%provider.layer(), found=partial.count(), "layer queried");
            chain.append_chain(partial);
        }

        tracing::debug!(candidates = chain.count(), "resolved");
        Ok(chain)
    }

    /// Like [ChainResolver::resolve] but an empty chain is an error
    pub fn require(&self, name: &str) -> Result<TemplateChain, ResolveError> {
        let chain = self.resolve(name)?;
        if chain.is_empty() {
            return Err(ResolveError::NotFound {
                name: name.to_owned(),
            });
        }
        Ok(chain)
    }
}

impl std::fmt::Debug for ChainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver")
            .field(
                "layers",
                &self.providers.iter().map(|p| p.layer()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("template {name:?} not found in any layer")]
    NotFound { name: String },
    #[error(transparent)]
    InvalidName(#[from] TemplateNameError),
}
