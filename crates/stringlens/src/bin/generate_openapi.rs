//! Writes the OpenAPI spec to `openapi.json` in the crate directory, or to the
//! path given as the first argument.
//!
//! Usage: `cargo run --bin generate_openapi [-- <path>]`

use std::path::PathBuf;

use anyhow::Context;
use stringlens::server::openapi::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let spec = ApiDoc::openapi()
        .to_pretty_json()
        .context("failed to serialize OpenAPI spec")?;

    let out_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("openapi.json"));

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("failed to create output directory")?;
    }
    std::fs::write(&out_path, &spec)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    println!("Wrote OpenAPI spec to {}", out_path.display());
    Ok(())
}
