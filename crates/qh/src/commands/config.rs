//! The `qh config` family and the config file every other command reads.
//!
//! The file holds the timezone, key metadata and reference dictionaries, so
//! saved searches render the same way on every run.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use query_helper_rs::keys::KeyItemSet;
use query_helper_rs::reference::ReferenceMap;
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};
use crate::output::helpers::format_header;

/// Schema version written by `qh config init`.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "QH_CONFIG";

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# qh - query helper configuration

# Config schema version (do not modify)
version = 1

# IANA timezone used to expand datetime filters (--timezone overrides)
# timezone = "UTC"

# Output preferences
[output]
# color = true

# Filterable keys, grouped for display. Later groups win on duplicate names.
# [[key_sets]]
# title = "Issue"
#
# [[key_sets.items]]
# name = "created_at"
# label = "Created"
# dataType = "datetime"
#
# [[key_sets.items]]
# name = "project_id"
# label = "Project"
# reference = "project"

# Reference dictionaries used to label ids: references.<name>.<id>
# [references.project.p-1]
# name = "p-1"
# label = "Website"
"#;

/// Contents of `config.toml`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Schema version; files without one are treated as current.
    #[serde(default = "default_version")]
    pub version: u32,

    /// IANA timezone for datetime expansion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Key metadata groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_sets: Vec<KeyItemSet>,

    /// Reference dictionaries by name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub references: HashMap<String, ReferenceMap>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            timezone: None,
            output: OutputConfig::default(),
            key_sets: Vec::new(),
            references: HashMap::new(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Resolves the config file location.
///
/// `QH_CONFIG` names the file directly; otherwise it is `qh/config.toml`
/// under `XDG_CONFIG_HOME`, falling back to `~/.config`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| CommandError::Config("no home directory to place config in".into()))?,
    };
    Ok(base.join("qh").join("config.toml"))
}

/// Loads the config file, or defaults when none exists yet.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), key_sets = config.key_sets.len(), "loaded config");
    Ok(config)
}

fn parse_config(content: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(content).map_err(|e| CommandError::Config(format!("invalid config: {e}")))?;
    migrate_config(config)
}

/// Brings an older (or newer) schema up to the current version.
///
/// Version 1 is the only schema so far, so this only stamps the version.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version != CONFIG_VERSION {
        tracing::debug!(from = config.version, to = CONFIG_VERSION, "migrating config");
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Prints the effective configuration.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is
/// invalid.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let exists = path.exists();
    let config = load_config()?;

    if ctx.json_output {
        let report = serde_json::json!({
            "path": path.display().to_string(),
            "exists": exists,
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    println!("{}", format_header("qh configuration", ctx.use_colors));
    println!("path     {}", path.display());
    if !exists {
        println!("(not created yet, run 'qh config init')");
        return Ok(());
    }

    println!("timezone {}", config.timezone.as_deref().unwrap_or("UTC (default)"));
    if let Some(color) = config.output.color {
        println!("color    {color}");
    }

    if !config.key_sets.is_empty() {
        println!("\n{}", format_header("key sets", ctx.use_colors));
        for set in &config.key_sets {
            println!("  {:<20} {} keys", set.title, set.items.len());
        }
    }

    if !config.references.is_empty() {
        println!("\n{}", format_header("references", ctx.use_colors));
        let mut names: Vec<_> = config.references.iter().collect();
        names.sort_by(|a, b| a.0.cmp(b.0));
        for (name, entries) in names {
            println!("  {:<20} {} entries", name, entries.len());
        }
    }

    Ok(())
}

/// Writes the starter config, refusing to clobber an existing file unless forced.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `force` - Overwrite an existing config file
///
/// # Errors
///
/// Returns [`CommandError::Config`] if the file exists and `force` is not set,
/// or if the directory or file cannot be written.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path()?;
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "{} already exists (pass --force to overwrite)",
            path.display()
        )));
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| CommandError::Config(format!("cannot create {}: {e}", dir.display())))?;
    }
    fs::write(&path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("cannot write {}: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), force, "wrote starter config");

    if ctx.json_output {
        let report = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !ctx.quiet {
        println!("Created config at: {}", path.display());
    }

    Ok(())
}

/// Prints where the config file lives.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let report = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn ctx() -> CommandContext {
        CommandContext {
            json_output: true,
            use_colors: false,
            quiet: true,
            timezone: None,
        }
    }

    /// Runs `f` with `QH_CONFIG` pointing into a fresh temp dir.
    fn with_config_env<F: FnOnce(&PathBuf)>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let original = env::var(CONFIG_ENV).ok();
        env::set_var(CONFIG_ENV, &path);

        f(&path);

        match original {
            Some(val) => env::set_var(CONFIG_ENV, val),
            None => env::remove_var(CONFIG_ENV),
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.timezone.is_none());
        assert!(config.output.color.is_none());
        assert!(config.key_sets.is_empty());
        assert!(config.references.is_empty());
    }

    #[test]
    fn test_default_config_template_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, 1);
        assert!(config.key_sets.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
version = 1
timezone = "Asia/Seoul"

[output]
color = false

[[key_sets]]
title = "Issue"

[[key_sets.items]]
name = "created_at"
label = "Created"
dataType = "datetime"

[[key_sets.items]]
name = "project_id"
label = "Project"
reference = "project"

[references.project."42"]
name = "42"
label = "Backend"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.timezone.as_deref(), Some("Asia/Seoul"));
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.key_sets[0].items.len(), 2);
        assert!(config.key_sets[0].items[0].is_datetime());
        assert_eq!(config.references["project"]["42"].label, "Backend");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            timezone: Some("UTC".to_string()),
            output: OutputConfig { color: Some(true) },
            ..Config::default()
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("version = 1"));
        assert!(toml_str.contains(r#"timezone = "UTC""#));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("color = true"));
        assert!(!toml_str.contains("key_sets"));
    }

    #[test]
    fn test_config_deserialization_with_future_version() {
        let config: Config = toml::from_str("version = 999").unwrap();
        assert_eq!(config.version, 999);
        assert_eq!(migrate_config(config).unwrap().version, CONFIG_VERSION);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let err = parse_config("timezone = [").unwrap_err();
        assert!(matches!(err, CommandError::Config(_)));
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        with_config_env(|path| {
            assert_eq!(&get_config_path().unwrap(), path);
        });
    }

    #[test]
    #[serial]
    fn test_load_missing_config_uses_defaults() {
        with_config_env(|_| {
            let config = load_config().unwrap();
            assert!(config.timezone.is_none());
        });
    }

    #[test]
    #[serial]
    fn test_init_writes_template_once() {
        with_config_env(|path| {
            execute_init(&ctx(), false).unwrap();
            assert!(path.exists());
            assert!(load_config().is_ok());

            let err = execute_init(&ctx(), false).unwrap_err();
            assert!(matches!(err, CommandError::Config(_)));

            fs::write(path, "timezone = \"Asia/Seoul\"\n").unwrap();
            execute_init(&ctx(), true).unwrap();
            assert!(load_config().unwrap().timezone.is_none());
        });
    }
}
