//! Version-specific engines behind the bridge.
//!
//! The two Tailwind major versions resolve their configuration differently
//! (v3: a JS/TS config file, v4: a CSS entry point). Each is a strategy
//! implementing `VersionEngine`; the worker hosts exactly one of them. The
//! resolved project state (prefix + custom classes) is memoized through the
//! config cache so repeated operations do not re-read the config file.

use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::bridge::ordering;
use crate::bridge::{resolve_v3_config, ConfigWarning, OrderEntry};
use crate::cache::ConfigCache;
use crate::errors::{LinterError, Result};

/// Per-request resolution inputs.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub cwd: PathBuf,
    pub config_path: Option<PathBuf>,
}

/// Project state derived from a resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectInfo {
    pub prefix: String,
    pub custom_classes: HashSet<String>,
}

/// The capability surface both framework versions provide.
pub trait VersionEngine: Send + Sync {
    /// Resolve the project configuration, or report why defaults are in use.
    fn project_info(&self, ctx: &EngineContext) -> Result<(ProjectInfo, Vec<ConfigWarning>)>;

    /// Prefix lookups may fail harder than the rest (v4 has no default).
    fn prefix(&self, ctx: &EngineContext) -> Result<(String, Vec<ConfigWarning>)> {
        let (info, warnings) = self.project_info(ctx)?;
        Ok((info.prefix, warnings))
    }

    fn class_order(
        &self,
        classes: &[String],
        ctx: &EngineContext,
    ) -> Result<(Vec<OrderEntry>, Vec<ConfigWarning>)> {
        let (info, warnings) = self.project_info(ctx)?;
        let entries = classes
            .iter()
            .map(|c| OrderEntry {
                class_name: c.clone(),
                order: ordering::class_order(c, &info.prefix, &info.custom_classes),
            })
            .collect();
        Ok((entries, warnings))
    }

    fn unregistered_classes(
        &self,
        classes: &[String],
        ctx: &EngineContext,
    ) -> Result<(Vec<String>, Vec<ConfigWarning>)> {
        let (info, warnings) = self.project_info(ctx)?;
        let unregistered = classes
            .iter()
            .filter(|c| !ordering::is_registered(c, &info.prefix, &info.custom_classes))
            .cloned()
            .collect();
        Ok((unregistered, warnings))
    }

    fn conflicting_classes(
        &self,
        classes: &[String],
        ctx: &EngineContext,
    ) -> Result<(Vec<Vec<String>>, Vec<ConfigWarning>)> {
        let (info, warnings) = self.project_info(ctx)?;
        let mut by_key: indexmap::IndexMap<String, Vec<String>> = indexmap::IndexMap::new();
        for class in classes {
            if let Some(key) = ordering::conflict_key(class, &info.prefix) {
                let entry = by_key.entry(key).or_default();
                if !entry.contains(class) {
                    entry.push(class.clone());
                }
            }
        }
        let conflicts = by_key
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(_, names)| names)
            .collect();
        Ok((conflicts, warnings))
    }

    fn custom_component_classes(
        &self,
        ctx: &EngineContext,
    ) -> Result<(Vec<String>, Vec<ConfigWarning>)> {
        let (info, warnings) = self.project_info(ctx)?;
        let mut classes: Vec<String> = info.custom_classes.into_iter().collect();
        classes.sort();
        Ok((classes, warnings))
    }
}

/// Tailwind v3: JS/TS config file discovered by upward search.
pub struct V3Engine {
    cache: ConfigCache,
}

impl V3Engine {
    pub fn new() -> Self {
        Self {
            cache: ConfigCache::new(),
        }
    }
}

impl Default for V3Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionEngine for V3Engine {
    fn project_info(&self, ctx: &EngineContext) -> Result<(ProjectInfo, Vec<ConfigWarning>)> {
        let resolved = ctx
            .config_path
            .clone()
            .or_else(|| resolve_v3_config(&ctx.cwd));
        let Some(path) = resolved else {
            return Ok((
                ProjectInfo::default(),
                vec![ConfigWarning {
                    option: "tailwindConfig".to_string(),
                    title: format!(
                        "No tailwind config found from {}, using framework defaults",
                        ctx.cwd.display()
                    ),
                    url: None,
                }],
            ));
        };
        let value = self.cache.with_cache(&path, || {
            let info = load_v3_config(&path)?;
            Ok(serde_json::to_value(WireProjectInfo::from(info))?)
        })?;
        let info: WireProjectInfo = serde_json::from_value(value)?;
        Ok((info.into(), Vec::new()))
    }
}

/// Tailwind v4: CSS entry point; no config-file fallback exists.
pub struct V4Engine {
    cache: ConfigCache,
}

impl V4Engine {
    pub fn new() -> Self {
        Self {
            cache: ConfigCache::new(),
        }
    }
}

impl Default for V4Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionEngine for V4Engine {
    fn project_info(&self, ctx: &EngineContext) -> Result<(ProjectInfo, Vec<ConfigWarning>)> {
        let Some(path) = ctx.config_path.clone() else {
            return Ok((
                ProjectInfo::default(),
                vec![ConfigWarning {
                    option: "entryPoint".to_string(),
                    title: "No CSS entry point configured, using framework defaults".to_string(),
                    url: None,
                }],
            ));
        };
        let value = self.cache.with_cache(&path, || {
            let info = load_v4_entry(&path)?;
            Ok(serde_json::to_value(WireProjectInfo::from(info))?)
        })?;
        let info: WireProjectInfo = serde_json::from_value(value)?;
        Ok((info.into(), Vec::new()))
    }

    fn prefix(&self, ctx: &EngineContext) -> Result<(String, Vec<ConfigWarning>)> {
        // A v4 prefix is defined by the entry point; with nothing to resolve
        // there is no default to fall back to.
        if ctx.config_path.is_none() {
            return Err(LinterError::MissingResource(
                "no CSS entry point: set the entryPoint option to resolve the v4 prefix"
                    .to_string(),
            ));
        }
        let (info, warnings) = self.project_info(ctx)?;
        Ok((info.prefix, warnings))
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct WireProjectInfo {
    prefix: String,
    custom_classes: Vec<String>,
}

impl From<ProjectInfo> for WireProjectInfo {
    fn from(info: ProjectInfo) -> Self {
        let mut custom: Vec<String> = info.custom_classes.into_iter().collect();
        custom.sort();
        Self {
            prefix: info.prefix,
            custom_classes: custom,
        }
    }
}

impl From<WireProjectInfo> for ProjectInfo {
    fn from(wire: WireProjectInfo) -> Self {
        Self {
            prefix: wire.prefix,
            custom_classes: wire.custom_classes.into_iter().collect(),
        }
    }
}

fn load_v3_config(path: &Path) -> Result<ProjectInfo> {
    let content = std::fs::read_to_string(path).map_err(|e| LinterError::ConfigError {
        message: format!("Failed to read tailwind config {}: {}", path.display(), e),
    })?;
    // The config is JS we do not execute; the prefix is the one scalar the
    // linter needs from it.
    let prefix_re = Regex::new(r#"prefix\s*:\s*['"]([^'"]*)['"]"#).unwrap();
    let prefix = prefix_re
        .captures(&content)
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    Ok(ProjectInfo {
        prefix,
        custom_classes: HashSet::new(),
    })
}

fn load_v4_entry(path: &Path) -> Result<ProjectInfo> {
    let content = std::fs::read_to_string(path).map_err(|e| LinterError::ConfigError {
        message: format!("Failed to read CSS entry point {}: {}", path.display(), e),
    })?;
    let prefix_re = Regex::new(r#"@import\s+["']tailwindcss["'][^;]*prefix\(([^)]+)\)"#).unwrap();
    let prefix = prefix_re
        .captures(&content)
        .map(|c| format!("{}-", c[1].trim()))
        .unwrap_or_default();
    let utility_re = Regex::new(r"@utility\s+([A-Za-z0-9_-]+)").unwrap();
    let custom_classes = utility_re
        .captures_iter(&content)
        .map(|c| c[1].to_string())
        .collect();
    Ok(ProjectInfo {
        prefix,
        custom_classes,
    })
}
