// src/catalog/defaults.rs

//! Built-in tool catalog.
//!
//! Matches the scripts shipped alongside the application: six categories of
//! repair tools plus the basic-fixes suite.

use std::collections::BTreeMap;

use crate::catalog::model::{
    Catalog, Category, ConfigSection, RawCatalogFile, SequenceConfig, ToolConfig,
};

const TOOLS: &[(&str, &str, &str, Category)] = &[
    (
        "network_reset",
        "Reset Network Stack",
        "network_reset.bat",
        Category::Network,
    ),
    (
        "flush_dns",
        "Flush DNS Cache",
        "flush_dns.bat",
        Category::Network,
    ),
    (
        "reset_adapter",
        "Reset Network Adapter",
        "reset_adapter.bat",
        Category::Network,
    ),
    (
        "network_diagnostics",
        "Network Diagnostics",
        "network_diagnostics.bat",
        Category::Network,
    ),
    (
        "bluetooth_restart",
        "Restart Bluetooth Service",
        "bluetooth_restart.bat",
        Category::Bluetooth,
    ),
    (
        "bluetooth_drivers",
        "Check Bluetooth Drivers",
        "bluetooth_drivers.bat",
        Category::Bluetooth,
    ),
    (
        "bluetooth_reset",
        "Reset Bluetooth Stack",
        "bluetooth_reset.bat",
        Category::Bluetooth,
    ),
    (
        "audio_restart",
        "Restart Audio Services",
        "audio_restart.bat",
        Category::Audio,
    ),
    (
        "audio_detect",
        "Audio Device Detection",
        "audio_detect.bat",
        Category::Audio,
    ),
    (
        "audio_troubleshoot",
        "Audio Troubleshooter",
        "audio_troubleshoot.bat",
        Category::Audio,
    ),
    (
        "display_check",
        "Display Settings Check",
        "display_check.bat",
        Category::Display,
    ),
    (
        "graphics_reset",
        "Reset Graphics Driver",
        "graphics_reset.bat",
        Category::Display,
    ),
    (
        "monitor_detect",
        "Monitor Detection",
        "monitor_detect.bat",
        Category::Display,
    ),
    (
        "clear_temp",
        "Clear Temp Files",
        "clear_temp.bat",
        Category::Storage,
    ),
    (
        "disk_cleanup",
        "Disk Cleanup",
        "disk_cleanup.bat",
        Category::Storage,
    ),
    (
        "disk_space",
        "Check Disk Space",
        "disk_space.bat",
        Category::Storage,
    ),
    (
        "startup_programs",
        "List Startup Programs",
        "startup_programs.bat",
        Category::Performance,
    ),
    (
        "memory_check",
        "Memory Usage Check",
        "memory_check.bat",
        Category::Performance,
    ),
    (
        "sfc_scan",
        "System File Check",
        "sfc_scan.bat",
        Category::Performance,
    ),
    (
        "performance_monitor",
        "Performance Monitor",
        "performance_monitor.bat",
        Category::Performance,
    ),
];

const BASIC_FIXES: &[&str] = &["flush_dns", "clear_temp", "network_reset", "audio_restart"];

/// Build the built-in catalog.
pub fn default_catalog() -> Catalog {
    let mut tool = BTreeMap::new();
    for (name, label, script, category) in TOOLS {
        tool.insert(
            name.to_string(),
            ToolConfig {
                label: label.to_string(),
                script: script.to_string(),
                category: *category,
            },
        );
    }

    let mut sequence = BTreeMap::new();
    sequence.insert(
        "basic_fixes".to_string(),
        SequenceConfig {
            label: "Basic Fixes Suite".to_string(),
            tools: BASIC_FIXES.iter().map(|s| s.to_string()).collect(),
        },
    );

    let raw = RawCatalogFile {
        config: ConfigSection::default(),
        tool,
        sequence,
    };

    Catalog::try_from(raw).expect("built-in catalog is valid")
}
