//! # tchain - layered template chain resolution
//!
//! ## Introduction for developers
//!
//! Read this to understand how `tchain` works internally.
//!
//! ### Layers
//!
//! A shop installation is assembled from independent customization layers, each
//! of which may ship its own version of the same logical template:
//!
//! - `shop`: overrides for one specific shop
//! - `theme`: the active theme, then its parent theme, then its parent...
//! - `module`: installed modules, in activation order
//! - `vendor`: the defaults everything else overrides
//!
//! Which directories belong to which layer is described by a
//! [config::LayerConfig], usually loaded from an HCL file.
//!
//! ### Fully-qualified names
//!
//! Every candidate is identified by its namespace plus its logical name, e.g.
//! `@flow/page/checkout.html` ([namespace::Namespace::fill_namespace]). Shop
//! and vendor use the namespaces `shop` and `vendor`, themes and modules use
//! their own id.
//!
//! ### Resolution
//!
//! see [resolver::ChainResolver::resolve]
//!
//! Each [layer::ChainProvider] checks its directories for the requested file
//! and returns a partial [chain::TemplateChain]. The resolver merges them in
//! fixed priority order:
//!
//! | **layer** | **directory**            | **entry**                  |
//! |-----------|--------------------------|----------------------------|
//! | shop      | `shop/tpl`               | `@shop/page.html`          |
//! | theme     | `themes/flow-child/tpl`  | (missing, no entry)        |
//! | theme     | `themes/flow/tpl`        | `@flow/page.html`          |
//! | module    | `modules/payment/views`  | `@payment/page.html`       |
//! | vendor    | `vendor/tpl`             | `@vendor/page.html`        |
//!
//! The chain is keyed by fully-qualified name. Appending a name that is
//! already present replaces the entry but keeps its position, so merging never
//! reorders. An empty chain means the template does not exist anywhere. It is
//! never silently replaced by a default.
//!
//! ### Navigation
//!
//! The first entry is the most specific one ([chain::TemplateChain::last_child],
//! "last child" in inheritance terms). The entry after it is its parent, the
//! version it overrides. [loader::TemplateLoader] exposes this to a template
//! engine: load the most specific source, or the parent of a given
//! fully-qualified name.
pub mod chain;
pub mod config;
pub mod fs;
pub mod layer;
pub mod loader;
pub mod mailto;
pub mod namespace;
pub mod resolver;
pub mod template_type;

pub use chain::{NavigationError, TemplateChain};
pub use resolver::{ChainResolver, ResolveError};
pub use template_type::{Layer, TemplateType};
