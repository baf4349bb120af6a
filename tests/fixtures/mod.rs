//! Shared test fixtures for engine, CLI and web tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use panelsmith::catalog::IconCatalog;
use panelsmith::models::{BuilderConfig, PanelSize};
use panelsmith::services::{BuilderSession, ReconcilePolicy};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Loads the embedded catalog.
pub fn catalog() -> Arc<IconCatalog> {
    Arc::new(IconCatalog::load().expect("catalog should load"))
}

/// Creates a fresh session with the default reconcile policy.
pub fn session(size: PanelSize, variant: &str) -> BuilderSession {
    BuilderSession::new(
        catalog(),
        BuilderConfig::new(size, variant),
        ReconcilePolicy::default(),
    )
}

/// Script that fills two switches on an 8-switch panel and swaps one.
pub fn script_basic() -> Value {
    json!({
        "config": {"size": "4", "variant": "8 switches", "glass": "White", "frame": "Gold"},
        "steps": [
            {"action": "place", "icon": "1", "slot": 0},
            {"action": "place", "icon": "12", "slot": 3},
            {"action": "move", "from": 3, "to": 5}
        ]
    })
}

/// Script whose second step references an unknown icon.
pub fn script_unknown_icon() -> Value {
    json!({
        "config": {"size": "2", "variant": "4 switches"},
        "steps": [
            {"action": "place_first_empty", "icon": "1"},
            {"action": "place", "icon": "does-not-exist", "slot": 1}
        ]
    })
}

/// Writes `script` as JSON into `dir` and returns its path.
pub fn write_script(dir: &Path, name: &str, script: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(script).unwrap()).expect("write script");
    path
}

/// Path to the panelsmith binary
pub fn panelsmith_bin() -> String {
    env!("CARGO_BIN_EXE_panelsmith").to_string()
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(panelsmith_bin());
    cmd.env("PANELSMITH_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}
