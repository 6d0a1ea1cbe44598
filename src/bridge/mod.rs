//! The Tailwind bridge: configuration resolution and class knowledge.
//!
//! Rules never load framework configuration themselves. They ask the bridge,
//! which either answers in-process (tests, single-version setups) or forwards
//! the request to a persistent worker process over JSON lines on
//! stdin/stdout. One worker exists per framework major version, spawned
//! lazily on first use and reused for the rest of the run; the two versions
//! resolve configuration so differently that they never share a process.

pub mod engine;
pub mod ordering;
pub mod worker;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Mutex;

use crate::errors::{LinterError, Result};
use engine::{EngineContext, V3Engine, V4Engine, VersionEngine};

/// Config file candidates tried per ancestor directory, in order.
pub const V3_CONFIG_FILES: &[&str] = &[
    "tailwind.config.js",
    "tailwind.config.cjs",
    "tailwind.config.mjs",
    "tailwind.config.ts",
];

/// Framework major versions the bridge can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TailwindVersion {
    V3,
    V4,
}

impl TailwindVersion {
    pub fn major(self) -> u32 {
        match self {
            TailwindVersion::V3 => 3,
            TailwindVersion::V4 => 4,
        }
    }

    pub fn from_major(major: u32) -> Result<Self> {
        match major {
            3 => Ok(TailwindVersion::V3),
            4 => Ok(TailwindVersion::V4),
            other => Err(LinterError::InvalidInput(format!(
                "unsupported tailwind major version: {other}"
            ))),
        }
    }
}

/// One class with the order the framework assigned it, `None` when the
/// framework does not recognize the class. Serialized positionally to keep
/// the wire format small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Option<u64>)", into = "(String, Option<u64>)")]
pub struct OrderEntry {
    pub class_name: String,
    pub order: Option<u64>,
}

impl From<(String, Option<u64>)> for OrderEntry {
    fn from((class_name, order): (String, Option<u64>)) -> Self {
        Self { class_name, order }
    }
}

impl From<OrderEntry> for (String, Option<u64>) {
    fn from(entry: OrderEntry) -> Self {
        (entry.class_name, entry.order)
    }
}

/// Non-fatal advisory tied to the option that triggered it; surfaced once
/// per lint run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigWarning {
    pub option: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeOp {
    ClassOrder,
    Prefix,
    UnregisteredClasses,
    ConflictingClasses,
    CustomComponentClasses,
}

/// One request over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeRequest {
    pub op: BridgeOp,
    #[serde(default)]
    pub classes: Vec<String>,
    pub cwd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

/// The wire reply: a positional `[payload, warnings]` tuple on success.
pub type BridgeReply = std::result::Result<(serde_json::Value, Vec<ConfigWarning>), String>;

/// Search `start` and its ancestors for a v3 config file.
pub fn resolve_v3_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        for candidate in V3_CONFIG_FILES {
            let path = current.join(candidate);
            if path.is_file() {
                return Some(path);
            }
        }
        dir = current.parent();
    }
    None
}

/// Pick the framework version for a lint target: an explicit CSS entry point
/// (or a `.css` config path) selects v4. Anything else lands on v3, falling
/// back to framework defaults when no config exists at all.
pub fn detect_version(config_path: Option<&Path>, entry_point: Option<&Path>) -> TailwindVersion {
    if entry_point.is_some() {
        return TailwindVersion::V4;
    }
    if let Some(path) = config_path {
        if path.extension().and_then(|e| e.to_str()) == Some("css") {
            return TailwindVersion::V4;
        }
    }
    TailwindVersion::V3
}

/// Dispatch one request against an engine. Shared by the worker loop and the
/// in-process backend so both answer identically.
pub fn dispatch(
    engine: &dyn VersionEngine,
    req: &BridgeRequest,
) -> Result<(serde_json::Value, Vec<ConfigWarning>)> {
    let ctx = EngineContext {
        cwd: PathBuf::from(&req.cwd),
        config_path: req.config_path.as_ref().map(PathBuf::from),
    };
    match req.op {
        BridgeOp::ClassOrder => {
            let (entries, warnings) = engine.class_order(&req.classes, &ctx)?;
            Ok((serde_json::to_value(entries)?, warnings))
        }
        BridgeOp::Prefix => {
            let (prefix, warnings) = engine.prefix(&ctx)?;
            Ok((serde_json::to_value(prefix)?, warnings))
        }
        BridgeOp::UnregisteredClasses => {
            let (classes, warnings) = engine.unregistered_classes(&req.classes, &ctx)?;
            Ok((serde_json::to_value(classes)?, warnings))
        }
        BridgeOp::ConflictingClasses => {
            let (conflicts, warnings) = engine.conflicting_classes(&req.classes, &ctx)?;
            Ok((serde_json::to_value(conflicts)?, warnings))
        }
        BridgeOp::CustomComponentClasses => {
            let (classes, warnings) = engine.custom_component_classes(&ctx)?;
            Ok((serde_json::to_value(classes)?, warnings))
        }
    }
}

struct WorkerHandle {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl WorkerHandle {
    fn spawn(program: &Path, version: TailwindVersion) -> Result<Self> {
        let mut child = Command::new(program)
            .arg("worker")
            .arg("--major")
            .arg(version.major().to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| LinterError::BridgeError(format!("failed to spawn worker: {e}")))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| LinterError::BridgeError("worker stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LinterError::BridgeError("worker stdout unavailable".to_string()))?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Blocking request/response: one JSON line out, one JSON line back.
    fn request(&mut self, req: &BridgeRequest) -> Result<(serde_json::Value, Vec<ConfigWarning>)> {
        let line = serde_json::to_string(req)?;
        self.stdin
            .write_all(line.as_bytes())
            .and_then(|_| self.stdin.write_all(b"\n"))
            .and_then(|_| self.stdin.flush())
            .map_err(|e| LinterError::BridgeError(format!("worker write failed: {e}")))?;

        let mut reply = String::new();
        let read = self
            .stdout
            .read_line(&mut reply)
            .map_err(|e| LinterError::BridgeError(format!("worker read failed: {e}")))?;
        if read == 0 {
            return Err(LinterError::BridgeError(
                "worker closed its pipe".to_string(),
            ));
        }
        let reply: BridgeReply = serde_json::from_str(&reply)?;
        reply.map_err(LinterError::BridgeError)
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

enum Backend {
    InProcess {
        v3: V3Engine,
        v4: V4Engine,
    },
    Workers {
        program: PathBuf,
        workers: Mutex<HashMap<TailwindVersion, WorkerHandle>>,
    },
}

/// The caller-facing bridge: owns the backend and deduplicates warnings.
pub struct TailwindBridge {
    backend: Backend,
    seen_warnings: Mutex<HashSet<String>>,
}

impl TailwindBridge {
    /// Answer requests directly in this process. Used by tests and available
    /// whenever process isolation is unnecessary.
    pub fn in_process() -> Self {
        Self {
            backend: Backend::InProcess {
                v3: V3Engine::new(),
                v4: V4Engine::new(),
            },
            seen_warnings: Mutex::new(HashSet::new()),
        }
    }

    /// Forward requests to per-version worker processes running `program`
    /// (normally the current executable in worker mode).
    pub fn with_workers(program: PathBuf) -> Self {
        Self {
            backend: Backend::Workers {
                program,
                workers: Mutex::new(HashMap::new()),
            },
            seen_warnings: Mutex::new(HashSet::new()),
        }
    }

    fn call(
        &self,
        version: TailwindVersion,
        req: &BridgeRequest,
    ) -> Result<(serde_json::Value, Vec<ConfigWarning>)> {
        match &self.backend {
            Backend::InProcess { v3, v4 } => match version {
                TailwindVersion::V3 => dispatch(v3, req),
                TailwindVersion::V4 => dispatch(v4, req),
            },
            Backend::Workers { program, workers } => {
                let mut workers = workers.lock().unwrap();
                if !workers.contains_key(&version) {
                    workers.insert(version, WorkerHandle::spawn(program, version)?);
                }
                workers.get_mut(&version).unwrap().request(req)
            }
        }
    }

    fn request(
        &self,
        version: TailwindVersion,
        op: BridgeOp,
        classes: &[String],
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(serde_json::Value, Vec<ConfigWarning>)> {
        let req = BridgeRequest {
            op,
            classes: classes.to_vec(),
            cwd: cwd.display().to_string(),
            config_path: config_path.map(|p| p.display().to_string()),
        };
        self.call(version, &req)
    }

    pub fn get_class_order(
        &self,
        version: TailwindVersion,
        classes: &[String],
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(Vec<OrderEntry>, Vec<ConfigWarning>)> {
        let (payload, warnings) =
            self.request(version, BridgeOp::ClassOrder, classes, cwd, config_path)?;
        Ok((serde_json::from_value(payload)?, warnings))
    }

    pub fn get_prefix(
        &self,
        version: TailwindVersion,
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(String, Vec<ConfigWarning>)> {
        let (payload, warnings) = self.request(version, BridgeOp::Prefix, &[], cwd, config_path)?;
        Ok((serde_json::from_value(payload)?, warnings))
    }

    pub fn get_unregistered_classes(
        &self,
        version: TailwindVersion,
        classes: &[String],
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(Vec<String>, Vec<ConfigWarning>)> {
        let (payload, warnings) = self.request(
            version,
            BridgeOp::UnregisteredClasses,
            classes,
            cwd,
            config_path,
        )?;
        Ok((serde_json::from_value(payload)?, warnings))
    }

    pub fn get_conflicting_classes(
        &self,
        version: TailwindVersion,
        classes: &[String],
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(Vec<Vec<String>>, Vec<ConfigWarning>)> {
        let (payload, warnings) = self.request(
            version,
            BridgeOp::ConflictingClasses,
            classes,
            cwd,
            config_path,
        )?;
        Ok((serde_json::from_value(payload)?, warnings))
    }

    pub fn get_custom_component_classes(
        &self,
        version: TailwindVersion,
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<(Vec<String>, Vec<ConfigWarning>)> {
        let (payload, warnings) = self.request(
            version,
            BridgeOp::CustomComponentClasses,
            &[],
            cwd,
            config_path,
        )?;
        Ok((serde_json::from_value(payload)?, warnings))
    }

    /// Filter out warnings already surfaced during this run.
    pub fn fresh_warnings(&self, warnings: Vec<ConfigWarning>) -> Vec<ConfigWarning> {
        let mut seen = self.seen_warnings.lock().unwrap();
        warnings
            .into_iter()
            .filter(|w| seen.insert(format!("{}|{}", w.option, w.title)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_entry_wire_format_is_positional() {
        let entry = OrderEntry {
            class_name: "p-4".to_string(),
            order: Some(42),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"["p-4",42]"#);
        let back: OrderEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_reply_round_trip() {
        let reply: BridgeReply = Ok((
            serde_json::json!([["p-4", 1]]),
            vec![ConfigWarning {
                option: "tailwindConfig".to_string(),
                title: "missing".to_string(),
                url: None,
            }],
        ));
        let line = serde_json::to_string(&reply).unwrap();
        let back: BridgeReply = serde_json::from_str(&line).unwrap();
        assert_eq!(back, reply);
    }

    #[test]
    fn test_resolve_v3_config_stops_at_first_hit() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("tailwind.config.js"), "x").unwrap();
        std::fs::write(dir.path().join("a").join("tailwind.config.ts"), "x").unwrap();
        let found = resolve_v3_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("a").join("tailwind.config.ts"));
    }

    #[test]
    fn test_resolve_v3_config_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_v3_config(dir.path()), None);
    }

    #[test]
    fn test_detect_version() {
        assert_eq!(
            detect_version(None, Some(Path::new("app.css"))),
            TailwindVersion::V4
        );
        assert_eq!(
            detect_version(Some(Path::new("theme.css")), None),
            TailwindVersion::V4
        );
        assert_eq!(
            detect_version(Some(Path::new("tailwind.config.js")), None),
            TailwindVersion::V3
        );
        assert_eq!(detect_version(None, None), TailwindVersion::V3);
    }

    #[test]
    fn test_in_process_bridge_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = TailwindBridge::in_process();
        let (entries, _) = bridge
            .get_class_order(
                TailwindVersion::V3,
                &["flex".to_string(), "nope".to_string()],
                dir.path(),
                None,
            )
            .unwrap();
        assert_eq!(entries[0].class_name, "flex");
        assert!(entries[0].order.is_some());
        assert_eq!(entries[1].order, None);
    }

    #[test]
    fn test_get_prefix_resolves_v3_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tailwind.config.js");
        std::fs::write(&config, "module.exports = { prefix: 'tw-' };").unwrap();
        let bridge = TailwindBridge::in_process();
        let (prefix, warnings) = bridge
            .get_prefix(TailwindVersion::V3, dir.path(), Some(&config))
            .unwrap();
        assert_eq!(prefix, "tw-");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_get_custom_component_classes_from_v4_entry() {
        let dir = tempfile::tempdir().unwrap();
        let entry = dir.path().join("app.css");
        std::fs::write(
            &entry,
            "@import \"tailwindcss\";\n@utility card {}\n@utility btn {}\n",
        )
        .unwrap();
        let bridge = TailwindBridge::in_process();
        let (classes, _) = bridge
            .get_custom_component_classes(TailwindVersion::V4, dir.path(), Some(&entry))
            .unwrap();
        assert_eq!(classes, vec!["btn".to_string(), "card".to_string()]);
    }

    #[test]
    fn test_warning_dedup() {
        let bridge = TailwindBridge::in_process();
        let warning = ConfigWarning {
            option: "tailwindConfig".to_string(),
            title: "missing".to_string(),
            url: None,
        };
        assert_eq!(bridge.fresh_warnings(vec![warning.clone()]).len(), 1);
        assert_eq!(bridge.fresh_warnings(vec![warning]).len(), 0);
    }
}
