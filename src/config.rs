//! Configuration module for the `cgpa` CLI

use crate::core::error::CgpaError;
use crate::core::grading::{GradeScale, ScalePreset};
use crate::core::models::Catalog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the config directory in path values
const DIR_VARIABLE: &str = "$CGPA";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Grading configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Built-in grade table: `e4` (E = 4 points) or `e5` (E = 5 points)
    #[serde(default)]
    pub scale: String,
    /// Custom grade table file; takes precedence over `scale` when set
    #[serde(default)]
    pub scale_file: String,
}

/// Catalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog TOML file; empty means the catalog bundled with the binary
    #[serde(default)]
    pub file: String,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Grade table settings
    #[serde(default)]
    pub grading: GradingConfig,
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override grade scale preset
    pub scale: Option<String>,
    /// Override custom grade table file
    pub scale_file: Option<String>,
    /// Override catalog file
    pub catalog_file: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$CGPA` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/cgpa`
    /// - macOS: `~/Library/Application Support/cgpa`
    /// - Windows: `%APPDATA%\cgpa`
    #[must_use]
    pub fn get_cgpa_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cgpa")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fields that are empty here and non-empty in `defaults` are copied over,
    /// so upgrades pick up new settings without losing user edits.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= fill_empty(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_empty(&mut self.logging.file, &defaults.logging.file);
        changed |= fill_empty(&mut self.grading.scale, &defaults.grading.scale);
        changed |= fill_empty(&mut self.grading.scale_file, &defaults.grading.scale_file);
        changed |= fill_empty(&mut self.catalog.file, &defaults.catalog.file);
        changed |= fill_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir);

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides affect this run only; they are never saved. Only non-`None`
    /// values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     scale: Some("e5".to_string()),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(scale) = &overrides.scale {
            self.grading.scale.clone_from(scale);
            // A preset chosen on the command line beats a configured custom table
            self.grading.scale_file.clear();
        }
        if let Some(scale_file) = &overrides.scale_file {
            self.grading.scale_file = Self::expand_variables(scale_file);
        }
        if let Some(catalog_file) = &overrides.catalog_file {
            self.catalog.file = Self::expand_variables(catalog_file);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir = Self::expand_variables(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_cgpa_dir`](Self::get_cgpa_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_cgpa_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CGPA` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let cgpa_dir = Self::get_cgpa_dir();
            value.replace(DIR_VARIABLE, cgpa_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults (empty strings, `false`).
    /// `$CGPA` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.grading.scale_file = Self::expand_variables(&config.grading.scale_file);
        config.catalog.file = Self::expand_variables(&config.catalog.file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed. The
    /// defaults are compiled in and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// - If the config file exists, load it, merge in missing defaults, and save when anything was added
    /// - On first run, create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// [`load`](Self::load) against an explicit file path
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        if let Ok(content) = fs::read_to_string(config_file) {
            if let Ok(mut config) = Self::from_toml(&content) {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                return config;
            }
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as pretty TOML to `config_file`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `scale`, `scale_file`,
    /// `catalog_file`, `reports_dir` (dashes are accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "scale" => Some(self.grading.scale.clone()),
            "scale_file" | "scale-file" => Some(self.grading.scale_file.clone()),
            "catalog_file" | "catalog-file" => Some(self.catalog.file.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Call [`save()`](Config::save) to persist the change.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, `verbose` is not a boolean,
    /// `level` is not a log level, or `scale` is not a preset name
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                if logger::Level::parse(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "scale" => {
                let preset: ScalePreset = value.parse().map_err(|e: CgpaError| e.to_string())?;
                self.grading.scale = preset.name().to_string();
            }
            "scale_file" | "scale-file" => self.grading.scale_file = value.to_string(),
            "catalog_file" | "catalog-file" => self.catalog.file = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "scale" => self.grading.scale.clone_from(&defaults.grading.scale),
            "scale_file" | "scale-file" => self
                .grading
                .scale_file
                .clone_from(&defaults.grading.scale_file),
            "catalog_file" | "catalog-file" => {
                self.catalog.file.clone_from(&defaults.catalog.file);
            }
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is nothing to delete.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Resolve the active grade table
    ///
    /// A custom `scale_file` wins; otherwise the `scale` preset, defaulting
    /// to `e4` when unset.
    ///
    /// # Errors
    /// Returns an error if the preset name is unknown or the file is unreadable.
    pub fn grade_scale(&self) -> Result<GradeScale, CgpaError> {
        if !self.grading.scale_file.is_empty() {
            return GradeScale::load(Path::new(&self.grading.scale_file));
        }
        if self.grading.scale.is_empty() {
            return Ok(GradeScale::default());
        }
        Ok(GradeScale::preset(self.grading.scale.parse()?))
    }

    /// Resolve the active catalog: the configured file, or the bundled one.
    ///
    /// # Errors
    /// Returns an error if the configured file cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CgpaError> {
        if self.catalog.file.is_empty() {
            Ok(Catalog::embedded())
        } else {
            Catalog::load(Path::new(&self.catalog.file))
        }
    }
}

/// Copy `default` into `value` when `value` is empty. Returns true on change.
fn fill_empty(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        *value = default.to_string();
        true
    } else {
        false
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  scale = \"{}\"", self.grading.scale)?;
        writeln!(f, "  scale_file = \"{}\"", self.grading.scale_file)?;

        writeln!(f, "\n[catalog]")?;
        writeln!(f, "  file = \"{}\"", self.catalog.file)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
