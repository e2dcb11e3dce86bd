//! per-layer chain providers
//!
//! Each provider knows the template directories of one customization layer and
//! answers "which of my directories contain this template?" with a partial
//! [TemplateChain]. A template missing from a layer is an empty chain, never an
//! error. Only malformed names are reported.
use crate::chain::TemplateChain;
use crate::fs::FileSystem;
use crate::namespace::{Namespace, TemplateNameError};
use crate::template_type::{Layer, TemplateType};
use std::path::{Path, PathBuf};

pub const SHOP_NAMESPACE: &str = "shop";
pub const VENDOR_NAMESPACE: &str = "vendor";

pub trait ChainProvider {
    fn layer(&self) -> Layer;

    /// Directories consulted by this provider, in lookup order
    fn template_directories(&self) -> Vec<&Path>;

    /// Candidates for the logical template `name` supplied by this layer
    fn chain(&self, name: &str, fs: &dyn FileSystem) -> Result<TemplateChain, TemplateNameError>;
}

/// A set of directories sharing one namespace
///
/// Within a source the first directory containing the template wins.
#[derive(Debug, Clone, derive_new::new)]
pub struct TemplateSource {
    pub namespace: Namespace,
    pub directories: Vec<PathBuf>,
}

impl TemplateSource {
    fn find(
        &self,
        layer: Layer,
        name: &str,
        fs: &dyn FileSystem,
    ) -> Result<Option<TemplateType>, TemplateNameError> {
        for directory in &self.directories {
            let path = fs.join(directory, name);
            tracing::trace!(%layer, namespace=%self.namespace, path=%path.display(), "checking");
            if !fs.exists(&path) {
                continue;
            }

            let fully_qualified_name = self.namespace.fill_namespace(name)?;
            tracing::debug!(%layer, %fully_qualified_name, directory=%directory.display(), "template found");

            return Ok(Some(TemplateType::new(
                fully_qualified_name,
                name,
                self.namespace.as_str(),
                layer,
                directory.clone(),
            )));
        }

        Ok(None)
    }
}

/// Flat layer with a single namespace (shop overrides, vendor default)
///
/// Contributes at most one entry.
#[derive(Debug, Clone, derive_new::new)]
pub struct DirectoryLayer {
    layer: Layer,
    source: TemplateSource,
}

impl DirectoryLayer {
    pub fn shop(directories: Vec<PathBuf>) -> Self {
        Self::new(
            Layer::Shop,
            TemplateSource::new(Namespace::from(SHOP_NAMESPACE), directories),
        )
    }

    pub fn vendor(directories: Vec<PathBuf>) -> Self {
        Self::new(
            Layer::Vendor,
            TemplateSource::new(Namespace::from(VENDOR_NAMESPACE), directories),
        )
    }
}

impl ChainProvider for DirectoryLayer {
    fn layer(&self) -> Layer {
        self.layer
    }

    fn template_directories(&self) -> Vec<&Path> {
        self.source.directories.iter().map(PathBuf::as_path).collect()
    }

    fn chain(&self, name: &str, fs: &dyn FileSystem) -> Result<TemplateChain, TemplateNameError> {
        Ok(self.source.find(self.layer, name, fs)?.into_iter().collect())
    }
}

/// Active theme followed by its ancestors
///
/// Every theme containing the template contributes one entry, child before
/// parent, each under the theme's own namespace.
#[derive(Debug, Clone, derive_new::new)]
pub struct ThemeLayer {
    lineage: Vec<TemplateSource>,
}

impl ChainProvider for ThemeLayer {
    fn layer(&self) -> Layer {
        Layer::Theme
    }

    fn template_directories(&self) -> Vec<&Path> {
        directories_of(&self.lineage)
    }

    fn chain(&self, name: &str, fs: &dyn FileSystem) -> Result<TemplateChain, TemplateNameError> {
        chain_of(&self.lineage, Layer::Theme, name, fs)
    }
}

/// Installed modules in activation order
///
/// Every module containing the template contributes one entry under the
/// module's namespace.
#[derive(Debug, Clone, derive_new::new)]
pub struct ModuleLayer {
    modules: Vec<TemplateSource>,
}

impl ChainProvider for ModuleLayer {
    fn layer(&self) -> Layer {
        Layer::Module
    }

    fn template_directories(&self) -> Vec<&Path> {
        directories_of(&self.modules)
    }

    fn chain(&self, name: &str, fs: &dyn FileSystem) -> Result<TemplateChain, TemplateNameError> {
        chain_of(&self.modules, Layer::Module, name, fs)
    }
}

fn directories_of(sources: &[TemplateSource]) -> Vec<&Path> {
    sources
        .iter()
        .flat_map(|source| source.directories.iter().map(PathBuf::as_path))
        .collect()
}

fn chain_of(
    sources: &[TemplateSource],
    layer: Layer,
    name: &str,
    fs: &dyn FileSystem,
) -> Result<TemplateChain, TemplateNameError> {
    let mut chain = TemplateChain::new();
    for source in sources {
        if let Some(template_type) = source.find(layer, name, fs)? {
            chain.append(template_type);
        }
    }
    Ok(chain)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fs::MemoryFileSystem;
    use pretty_assertions::assert_eq;

    fn names(chain: &TemplateChain) -> Vec<&str> {
        chain.iter().map(TemplateType::fully_qualified_name).collect()
    }

    fn source(namespace: &str, directories: &[&str]) -> TemplateSource {
        TemplateSource::new(
            Namespace::from(namespace),
            directories.iter().map(PathBuf::from).collect(),
        )
    }

    #[test]
    fn directory_layer_first_match_wins() {
        let fs = MemoryFileSystem::with_files([
            ("/shop/b/page.html", ""),
            ("/shop/c/page.html", ""),
        ]);
        let shop = DirectoryLayer::shop(vec!["/shop/a".into(), "/shop/b".into(), "/shop/c".into()]);

        let chain = shop.chain("page.html", &fs).unwrap();

        assert_eq!(names(&chain), ["@shop/page.html"]);
        let entry = chain.last_child().unwrap();
        assert_eq!(entry.directory(), Path::new("/shop/b"));
        assert_eq!(entry.layer(), Layer::Shop);
    }

    #[test]
    fn directory_layer_missing_template_is_empty() {
        let fs = MemoryFileSystem::new();
        let vendor = DirectoryLayer::vendor(vec!["/vendor".into()]);

        let chain = vendor.chain("page.html", &fs).unwrap();

        assert!(chain.is_empty());
    }

    #[test]
    fn directory_layer_propagates_name_errors() {
        let fs = MemoryFileSystem::with_files([("/vendor/page.html", "")]);
        let vendor = DirectoryLayer::vendor(vec!["/vendor".into()]);

        let error = vendor.chain("@shop/page.html", &fs).unwrap_err();

        assert!(matches!(error, TemplateNameError::NamespaceMismatch { .. }));
    }

    #[test]
    fn theme_layer_orders_child_before_parent() {
        let fs = MemoryFileSystem::with_files([
            ("/themes/parent/page.html", ""),
            ("/themes/child/page.html", ""),
        ]);
        let theme = ThemeLayer::new(vec![
            source("child", &["/themes/child"]),
            source("parent", &["/themes/parent"]),
        ]);

        let chain = theme.chain("page.html", &fs).unwrap();

        assert_eq!(names(&chain), ["@child/page.html", "@parent/page.html"]);
    }

    #[test]
    fn theme_layer_skips_themes_without_template() {
        let fs = MemoryFileSystem::with_files([("/themes/parent/page.html", "")]);
        let theme = ThemeLayer::new(vec![
            source("child", &["/themes/child"]),
            source("parent", &["/themes/parent"]),
        ]);

        let chain = theme.chain("page.html", &fs).unwrap();

        assert_eq!(names(&chain), ["@parent/page.html"]);
    }

    #[test]
    fn module_layer_one_entry_per_module() {
        let fs = MemoryFileSystem::with_files([
            ("/modules/payment/views/page.html", ""),
            ("/modules/payment/legacy/page.html", ""),
            ("/modules/search/views/page.html", ""),
        ]);
        let modules = ModuleLayer::new(vec![
            source("payment", &["/modules/payment/views", "/modules/payment/legacy"]),
            source("banner", &["/modules/banner/views"]),
            source("search", &["/modules/search/views"]),
        ]);

        let chain = modules.chain("page.html", &fs).unwrap();

        assert_eq!(names(&chain), ["@payment/page.html", "@search/page.html"]);
        assert_eq!(
            modules.template_directories(),
            [
                Path::new("/modules/payment/views"),
                Path::new("/modules/payment/legacy"),
                Path::new("/modules/banner/views"),
                Path::new("/modules/search/views"),
            ]
        );
    }
}
