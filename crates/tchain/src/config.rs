//! layer configuration
//!
//! Describes which directories belong to which layer. Stored as HCL:
//!
//! ```hcl
//! active_theme = "flow-child"
//!
//! shop { directories = ["shop/tpl"] }
//!
//! theme "flow" { directories = ["themes/flow/tpl"] }
//! theme "flow-child" {
//!   directories = ["themes/flow-child/tpl"]
//!   parent      = "flow"
//! }
//!
//! module "payment" { directories = ["modules/payment/views"] }
//!
//! vendor { directories = ["vendor/tpl"] }
//! ```
//!
//! Module priority follows the order of the `module` blocks.
use crate::layer::{SHOP_NAMESPACE, VENDOR_NAMESPACE};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    #[serde(default)]
    pub active_theme: Option<String>,
    #[serde(default)]
    pub shop: Option<Directories>,
    #[serde(default, rename = "theme")]
    pub themes: IndexMap<String, Theme>,
    #[serde(default, rename = "module")]
    pub modules: IndexMap<String, Directories>,
    #[serde(default)]
    pub vendor: Option<Directories>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct Directories {
    #[serde(default)]
    pub directories: Vec<PathBuf>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct Theme {
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    #[serde(default)]
    pub parent: Option<String>,
}

impl std::str::FromStr for LayerConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(hcl::from_str(content)?)
    }
}

impl LayerConfig {
    /// Load from an HCL file
    ///
    /// Relative directories are interpreted relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let path = path.canonicalize()?;
        tracing::info!(path=%path.display(), "loading layer configuration");

        let content = std::fs::read_to_string(&path)?;
        let mut config: LayerConfig = content.parse()?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }

        Ok(config)
    }

    /// Prefix every relative directory with `base`
    pub fn rebase(&mut self, base: &Path) {
        let all_directories = self
            .shop
            .iter_mut()
            .chain(self.modules.values_mut())
            .chain(self.vendor.iter_mut())
            .flat_map(|block| block.directories.iter_mut())
            .chain(
                self.themes
                    .values_mut()
                    .flat_map(|theme| theme.directories.iter_mut()),
            );

        for directory in all_directories {
            if directory.is_relative() {
                *directory = base.join(&*directory);
            }
        }
    }

    /// Active theme followed by its ancestors, most derived first
    ///
    /// Empty when no theme is active.
    pub fn theme_lineage(&self) -> Result<Vec<(&str, &Theme)>, ConfigError> {
        let mut lineage: Vec<(&str, &Theme)> = vec![];
        let mut next = self.active_theme.as_deref();

        while let Some(id) = next {
            if lineage.iter().any(|(known, _)| *known == id) {
                let mut cycle: Vec<String> =
                    lineage.iter().map(|(known, _)| known.to_string()).collect();
                cycle.push(id.to_owned());
                return Err(ConfigError::ThemeCycle { cycle });
            }

            let (id, theme) = self
                .themes
                .get_key_value(id)
                .ok_or_else(|| ConfigError::UnknownTheme {
                    theme: id.to_owned(),
                })?;

            lineage.push((id.as_str(), theme));
            next = theme.parent.as_deref();
        }

        Ok(lineage)
    }

    /// Every theme and module id must be a namespace of its own
    ///
    /// `shop` and `vendor` are taken by their layers.
    pub fn check_namespaces(&self) -> Result<(), ConfigError> {
        let mut taken = vec![SHOP_NAMESPACE, VENDOR_NAMESPACE];

        for id in self.themes.keys().chain(self.modules.keys()) {
            if taken.contains(&id.as_str()) {
                return Err(ConfigError::DuplicateNamespace {
                    namespace: id.clone(),
                });
            }
            taken.push(id.as_str());
        }

        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse layer configuration")]
    ParseFailed(#[from] hcl::Error),
    #[error("unknown theme {theme:?}")]
    UnknownTheme { theme: String },
    #[error("circular theme inheritance: {}", cycle.join(" -> "))]
    ThemeCycle { cycle: Vec<String> },
    #[error("namespace {namespace:?} is claimed by more than one layer")]
    DuplicateNamespace { namespace: String },
}
