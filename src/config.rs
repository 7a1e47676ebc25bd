/*
 * ==========================================================================
 * SADAL - Simple Ada-Like Interpreter
 * ==========================================================================
 * 
 * File:     config.rs
 * Purpose:  Run configuration for the SADAL interpreter, loaded from JSON.
 * 
 * Author:   Sam Wilcox
 * Email:    sam@pawx-lang.com
 * 
 * License:
 * This file is part of the SADAL interpreter project.
 * 
 * SADAL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 * 
 * You may choose either license to govern your use of this software.
 * 
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * 
 * ==========================================================================
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sadal.json";

/// How diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticFormat {
    #[default]
    Text,
    Json,
}

/// Interpreter settings.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```json
/// { "list_declarations": true, "diagnostics": "json" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Printed after a blank line when a program finishes with no errors.
    pub success_banner: String,

    /// Print `Declared Variables:` and the sorted names before the banner.
    pub list_declarations: bool,

    pub diagnostics: DiagnosticFormat,

    /// Quote the offending source line under each text diagnostic.
    pub show_source: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            success_banner: "(DONE)".to_string(),
            list_declarations: false,
            diagnostics: DiagnosticFormat::Text,
            show_source: false,
        }
    }
}

impl Config {
    /// Loads a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Resolves the config for a run.
    ///
    /// # Lookup Order
    /// 1. `explicit`, when given (a missing file is an error)
    /// 2. `sadal.json` inside `dir`, when it exists
    /// 3. built-in defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load(&candidate);
        }

        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_files_keep_defaults() {
        let config: Config = serde_json::from_str(r#"{ "list_declarations": true }"#).unwrap();
        assert!(config.list_declarations);
        assert_eq!(config.success_banner, "(DONE)");
        assert_eq!(config.diagnostics, DiagnosticFormat::Text);
    }

    #[test]
    fn diagnostic_format_is_lowercase() {
        let config: Config = serde_json::from_str(r#"{ "diagnostics": "json" }"#).unwrap();
        assert_eq!(config.diagnostics, DiagnosticFormat::Json);
    }

    #[test]
    fn discover_prefers_the_working_directory_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        file.write_all(br#"{ "success_banner": "OK" }"#).unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.success_banner, "OK");
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            Config::discover(Some(&missing), dir.path()),
            Err(ConfigError::Io { .. })
        ));
    }
}
