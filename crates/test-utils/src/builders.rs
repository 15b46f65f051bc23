use std::collections::BTreeMap;
use std::path::PathBuf;

use fixkit::catalog::{
    Catalog, Category, ConfigSection, RawCatalogFile, SequenceConfig, ToolConfig,
};

/// Builder for `Catalog` to simplify test setup.
pub struct CatalogBuilder {
    raw: RawCatalogFile,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawCatalogFile {
                config: ConfigSection::default(),
                tool: BTreeMap::new(),
                sequence: BTreeMap::new(),
            },
        }
    }

    pub fn scripts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.raw.config.scripts_dir = dir.into();
        self
    }

    pub fn settle_delay_ms(mut self, ms: u64) -> Self {
        self.raw.config.settle_delay_ms = ms;
        self
    }

    pub fn with_tool(mut self, name: &str, tool: ToolConfig) -> Self {
        self.raw.tool.insert(name.to_string(), tool);
        self
    }

    pub fn with_sequence(mut self, name: &str, label: &str, tools: &[&str]) -> Self {
        self.raw.sequence.insert(
            name.to_string(),
            SequenceConfig {
                label: label.to_string(),
                tools: tools.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    pub fn build(self) -> Catalog {
        Catalog::try_from(self.raw).expect("Failed to build valid catalog from builder")
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ToolConfig`.
pub struct ToolBuilder {
    tool: ToolConfig,
}

impl ToolBuilder {
    pub fn new(label: &str, script: &str) -> Self {
        Self {
            tool: ToolConfig {
                label: label.to_string(),
                script: script.to_string(),
                category: Category::Network,
            },
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.tool.category = category;
        self
    }

    pub fn build(self) -> ToolConfig {
        self.tool
    }
}
