//! Capability registration with a host-provided sentinel.
//!
//! Usage: RUST_LOG=pullseq_core=debug cargo run --example registry

use pullseq_core::error::Result;
use pullseq_core::registry::{Capability, Namespace, Provider, Registry, register_builtins};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pullseq_core=debug".into()),
        )
        .init();

    let mut registry = Registry::new();
    registry.install_if_absent(Capability::external(Namespace::Iterator, "map", "host"));

    let first = register_builtins(&mut registry);
    let second = register_builtins(&mut registry);
    tracing::info!(first, second, total = registry.len(), "registration finished");

    let map = registry.require(Namespace::Iterator, "map")?;
    assert_eq!(map.provider, Provider::External("host".into()));

    println!("{}", serde_json::to_string_pretty(&registry.iter().collect::<Vec<_>>())?);
    Ok(())
}
