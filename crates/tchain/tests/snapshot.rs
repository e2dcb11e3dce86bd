//! Snapshot tests
//!
//! Resolves templates against the on-disk storefront in /tests/fixtures/ and
//! compares the rendered chains.

use std::path::{Path, PathBuf};
use tchain::config::LayerConfig;
use tchain::fs::OsFileSystem;
use tchain::loader::TemplateLoader;
use tchain::{ChainResolver, TemplateChain};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/storefront")
        .canonicalize()
        .expect("fixture directory must exist")
}

fn resolver() -> ChainResolver {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("TCHAIN_LOG"))
        .with_writer(std::io::stderr)
        .try_init();

    let config = LayerConfig::from_file(&fixture().join("tchain.hcl")).expect("valid config");
    ChainResolver::from_config(&config, OsFileSystem).expect("valid layers")
}

/// One line per entry: layer, fully-qualified name, directory below the fixture
fn render(chain: &TemplateChain) -> String {
    let base = fixture();
    chain
        .iter()
        .map(|entry| {
            let directory = entry
                .directory()
                .strip_prefix(&base)
                .expect("directory inside fixture");
            format!(
                "{} {} {}",
                entry.layer(),
                entry.fully_qualified_name(),
                directory.display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn every_layer_overrides() {
    let chain = resolver().resolve("page/checkout.html").unwrap();

    insta::assert_snapshot!(render(&chain), @r###"
    shop @shop/page/checkout.html shop/tpl
    theme @flow/page/checkout.html themes/flow/tpl
    module @payment/page/checkout.html modules/payment/views
    vendor @vendor/page/checkout.html vendor/tpl
    "###);
}

#[test]
fn child_theme_before_parent_theme() {
    let chain = resolver().resolve("layout/base.html").unwrap();

    insta::assert_snapshot!(render(&chain), @r###"
    theme @flow-child/layout/base.html themes/flow-child/tpl
    theme @flow/layout/base.html themes/flow/tpl
    vendor @vendor/layout/base.html vendor/tpl
    "###);
}

#[test]
fn module_only_template() {
    let chain = resolver().resolve("page/payment.html").unwrap();

    insta::assert_snapshot!(render(&chain), @"module @payment/page/payment.html modules/payment/views");
}

#[test]
fn vendor_default_only() {
    let chain = resolver().resolve("email/order.html").unwrap();

    insta::assert_snapshot!(render(&chain), @"vendor @vendor/email/order.html vendor/tpl");
}

#[test]
fn unknown_template_is_empty() {
    let chain = resolver().resolve("page/missing.html").unwrap();

    assert_eq!(chain.count(), 0);
    assert!(resolver().require("page/missing.html").is_err());
}

#[test]
fn load_walks_parents_down_to_vendor() {
    let loader = TemplateLoader::new(resolver());

    let mut current = loader.load("page/checkout.html").unwrap();
    let mut sources = vec![current.source.clone()];
    while let Ok(parent) = loader.load_parent(current.template.fully_qualified_name()) {
        sources.push(parent.source.clone());
        current = parent;
    }

    let sources = sources.concat();
    insta::assert_snapshot!(sources.trim_end(), @r###"
    shop checkout
    flow checkout
    payment checkout
    vendor checkout
    "###);
    assert_eq!(
        current.template.fully_qualified_name(),
        "@vendor/page/checkout.html"
    );
}

#[test]
fn override_detection() {
    let loader = TemplateLoader::new(resolver());

    assert!(loader.has_override("page/checkout.html").unwrap());
    assert!(loader.has_override("layout/base.html").unwrap());
    assert!(!loader.has_override("email/order.html").unwrap());
    assert!(!loader.exists("page/missing.html").unwrap());
}
