// src/catalog/model.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::errors::{FixkitError, Result};
use crate::runner::ScriptTask;

/// Top-level catalog as read from a TOML file.
///
/// ```toml
/// [config]
/// scripts_dir = "scripts"
/// settle_delay_ms = 500
///
/// [tool.flush_dns]
/// label = "Flush DNS Cache"
/// script = "flush_dns.bat"
/// category = "network"
///
/// [sequence.basic_fixes]
/// label = "Basic Fixes Suite"
/// tools = ["flush_dns"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalogFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tools from `[tool.<name>]`. Keys are the tool names.
    #[serde(default)]
    pub tool: BTreeMap<String, ToolConfig>,

    /// Named tool sequences from `[sequence.<name>]`.
    #[serde(default)]
    pub sequence: BTreeMap<String, SequenceConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Directory holding the script files; tool paths resolve against it.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,

    /// Pause between sequence steps, in milliseconds. Display-only settling
    /// time; has no correctness role.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

fn default_scripts_dir() -> PathBuf {
    PathBuf::from("scripts")
}

fn default_settle_delay_ms() -> u64 {
    500
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

/// `[tool.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    /// Human-readable name shown in status and log messages.
    pub label: String,

    /// Script file name, relative to `scripts_dir`.
    pub script: String,

    /// Catalog category the tool is listed under.
    pub category: Category,
}

/// `[sequence.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceConfig {
    /// Human-readable name for the suite.
    pub label: String,

    /// Ordered tool names; order is preserved exactly at run time.
    pub tools: Vec<String>,
}

/// Catalog category for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Network,
    Bluetooth,
    Audio,
    Display,
    Storage,
    Performance,
}

impl Category {
    /// All categories, in listing order.
    pub fn all() -> [Category; 6] {
        [
            Category::Network,
            Category::Bluetooth,
            Category::Audio,
            Category::Display,
            Category::Storage,
            Category::Performance,
        ]
    }

    /// Listing title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Network => "Network",
            Category::Bluetooth => "Bluetooth",
            Category::Audio => "Audio",
            Category::Display => "Display",
            Category::Storage => "Storage",
            Category::Performance => "Performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "network" => Ok(Category::Network),
            "bluetooth" => Ok(Category::Bluetooth),
            "audio" => Ok(Category::Audio),
            "display" => Ok(Category::Display),
            "storage" => Ok(Category::Storage),
            "performance" => Ok(Category::Performance),
            other => Err(format!("invalid category: {other}")),
        }
    }
}

/// Validated catalog.
///
/// Produced via `TryFrom<RawCatalogFile>`, which checks that every sequence
/// lists at least one tool and references only known tools.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub config: ConfigSection,
    pub tool: BTreeMap<String, ToolConfig>,
    pub sequence: BTreeMap<String, SequenceConfig>,
}

impl TryFrom<RawCatalogFile> for Catalog {
    type Error = FixkitError;

    fn try_from(raw: RawCatalogFile) -> Result<Self> {
        validate(&raw)?;
        Ok(Self {
            config: raw.config,
            tool: raw.tool,
            sequence: raw.sequence,
        })
    }
}

fn validate(raw: &RawCatalogFile) -> Result<()> {
    for (name, seq) in &raw.sequence {
        if seq.tools.is_empty() {
            return Err(FixkitError::ConfigError(format!(
                "sequence '{name}' lists no tools"
            )));
        }
        for tool in &seq.tools {
            if !raw.tool.contains_key(tool) {
                return Err(FixkitError::ConfigError(format!(
                    "sequence '{name}' references unknown tool '{tool}'"
                )));
            }
        }
    }
    Ok(())
}

impl Catalog {
    /// Resolve a tool name into a runnable task against the scripts root.
    pub fn task_for(&self, name: &str) -> Result<ScriptTask> {
        let tool = self
            .tool
            .get(name)
            .ok_or_else(|| FixkitError::ToolNotFound(name.to_string()))?;
        Ok(self.resolve(tool))
    }

    /// Resolve every entry of a named sequence, preserving order.
    pub fn tasks_for_sequence(&self, name: &str) -> Result<Vec<ScriptTask>> {
        let seq = self
            .sequence
            .get(name)
            .ok_or_else(|| FixkitError::SequenceNotFound(name.to_string()))?;
        seq.tools.iter().map(|t| self.task_for(t)).collect()
    }

    /// Sequence metadata by name.
    pub fn sequence_config(&self, name: &str) -> Result<&SequenceConfig> {
        self.sequence
            .get(name)
            .ok_or_else(|| FixkitError::SequenceNotFound(name.to_string()))
    }

    /// Tools listed under one category, in catalog order.
    pub fn tools_in(&self, category: Category) -> impl Iterator<Item = (&str, &ToolConfig)> {
        self.tool
            .iter()
            .filter(move |(_, tool)| tool.category == category)
            .map(|(name, tool)| (name.as_str(), tool))
    }

    fn resolve(&self, tool: &ToolConfig) -> ScriptTask {
        ScriptTask::new(
            self.config.scripts_dir.join(&tool.script),
            tool.label.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_tool(name: &str) -> RawCatalogFile {
        let mut tool = BTreeMap::new();
        tool.insert(
            name.to_string(),
            ToolConfig {
                label: "Flush DNS Cache".to_string(),
                script: "flush_dns.bat".to_string(),
                category: Category::Network,
            },
        );
        RawCatalogFile {
            config: ConfigSection::default(),
            tool,
            sequence: BTreeMap::new(),
        }
    }

    #[test]
    fn sequence_referencing_unknown_tool_is_rejected() {
        let mut raw = raw_with_tool("flush_dns");
        raw.sequence.insert(
            "basic".to_string(),
            SequenceConfig {
                label: "Basic".to_string(),
                tools: vec!["flush_dns".to_string(), "nope".to_string()],
            },
        );
        let err = Catalog::try_from(raw).unwrap_err();
        assert!(matches!(err, FixkitError::ConfigError(_)));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let mut raw = raw_with_tool("flush_dns");
        raw.sequence.insert(
            "basic".to_string(),
            SequenceConfig {
                label: "Basic".to_string(),
                tools: vec![],
            },
        );
        assert!(Catalog::try_from(raw).is_err());
    }

    #[test]
    fn task_paths_resolve_against_scripts_dir() {
        let catalog = Catalog::try_from(raw_with_tool("flush_dns")).unwrap();
        let task = catalog.task_for("flush_dns").unwrap();
        assert_eq!(task.path, PathBuf::from("scripts").join("flush_dns.bat"));
        assert_eq!(task.label, "Flush DNS Cache");
    }

    #[test]
    fn unknown_tool_lookup_fails() {
        let catalog = Catalog::try_from(raw_with_tool("flush_dns")).unwrap();
        assert!(matches!(
            catalog.task_for("bogus"),
            Err(FixkitError::ToolNotFound(_))
        ));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Network".parse::<Category>().unwrap(), Category::Network);
        assert_eq!(" audio ".parse::<Category>().unwrap(), Category::Audio);
        assert!("desktop".parse::<Category>().is_err());
    }
}
