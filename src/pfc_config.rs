// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// Configuration File I/O
/// Handles config file management, archiving, and path resolution
///
/// Responsibilities:
/// - Config directory and file path resolution (~/.config/physiform/config.xml)
/// - Deployment of the embedded default configuration on first run
/// - Automatic archiving of the existing config before saves (config.xml.NNNNN)
/// - File I/O operations for loading and saving config

use std::fs;
use std::path::{Path, PathBuf};

use crate::pfe_error::FormError;

// ============================================================================
// SECTION 1: Embedded default configuration
// ============================================================================

const DEFAULT_CONFIG_XML: &str = include_str!("../config.default.xml");

/// Get embedded default config content
pub fn default_config() -> &'static str {
    DEFAULT_CONFIG_XML
}

// ============================================================================
// SECTION 2: Config path resolution
// ============================================================================

/// Resolve the standard config file path
pub fn config_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("physiform");
    path.push("config.xml");
    path
}

// ============================================================================
// SECTION 3: Default deployment and archiving
// ============================================================================

/// Deploy the embedded default config if no config exists yet.
/// Never overwrites an existing file: the config is user-edited state.
pub fn ensure_default_config(path: &Path) -> Result<(), FormError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_XML)?;
    eprintln!("CONFIG: deployed embedded default to {}", path.display());
    Ok(())
}

/// Archive an existing config to config.xml.NNNNN before it is overwritten.
/// Returns the archive path, or None if there was nothing to archive.
pub fn archive_config(path: &Path) -> Result<Option<PathBuf>, FormError> {
    if !path.exists() {
        return Ok(None);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "config.xml".to_string());

    // Find next available suffix starting at 10000
    let mut suffix = 10000;
    let archive_path = loop {
        let candidate = path.with_file_name(format!("{}.{}", file_name, suffix));
        if !candidate.exists() {
            break candidate;
        }
        suffix += 1;
    };

    fs::rename(path, &archive_path)?;
    eprintln!("CONFIG: archived existing {} -> {}.{}", file_name, file_name, suffix);
    Ok(Some(archive_path))
}

// ============================================================================
// SECTION 4: Config file I/O
// ============================================================================

/// Load config file contents
pub fn load_config_file(path: &Path) -> Result<String, FormError> {
    Ok(fs::read_to_string(path)?)
}

/// Save config file contents, archiving any previous version first
pub fn save_config_file(path: &Path, contents: &str) -> Result<(), FormError> {
    archive_config(path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
