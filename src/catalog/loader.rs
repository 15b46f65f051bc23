// src/catalog/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::defaults::default_catalog;
use crate::catalog::model::{Catalog, RawCatalogFile};
use crate::errors::Result;

/// Load a catalog file from a given path and return the raw `RawCatalogFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (sequence references, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCatalogFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let catalog: RawCatalogFile = toml::from_str(&contents)?;

    Ok(catalog)
}

/// Load a catalog file from path and run validation.
///
/// - Reads TOML, applying defaults via `serde` + `Default` impls.
/// - Checks sequences for unknown tool references and empty tool lists.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Catalog> {
    let raw = load_from_path(&path)?;
    let catalog = Catalog::try_from(raw)?;
    Ok(catalog)
}

/// Default catalog path: `Fixkit.toml` in the current working directory.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from("Fixkit.toml")
}

/// Resolve the catalog for a session.
///
/// - An explicit path must load cleanly.
/// - Otherwise `Fixkit.toml` is used when present.
/// - Otherwise the built-in catalog applies.
pub fn load_or_default(path: Option<&Path>) -> Result<Catalog> {
    if let Some(path) = path {
        return load_and_validate(path);
    }

    let fallback = default_catalog_path();
    if fallback.exists() {
        debug!(path = %fallback.display(), "loading catalog from default path");
        return load_and_validate(&fallback);
    }

    debug!("no catalog file found; using built-in catalog");
    Ok(default_catalog())
}
