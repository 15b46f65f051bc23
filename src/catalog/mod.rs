// src/catalog/mod.rs

//! Tool catalog.
//!
//! The catalog maps tool names to script files grouped by category, plus
//! named sequences of tools (e.g. the basic-fixes suite). It is read from a
//! `Fixkit.toml` file when one is present and falls back to the built-in
//! catalog in [`defaults`].

pub mod defaults;
pub mod loader;
pub mod model;

pub use defaults::default_catalog;
pub use loader::{default_catalog_path, load_and_validate, load_or_default};
pub use model::{
    Catalog, Category, ConfigSection, RawCatalogFile, SequenceConfig, ToolConfig,
};
