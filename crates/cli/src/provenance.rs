use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a generated dataset.
pub struct Payload {
    pub params: Value,
    /// Free-form labels from `--tag`.
    pub tags: Vec<String>,
    /// Summary numbers of the run (sizes, seed).
    pub stats: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            tags: Vec::new(),
            stats: Value::Null,
        }
    }
}

/// Provenance block shared by sidecars and `cli report`.
pub fn base_block(tags: &[String]) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "scwalk_version": scwalk::VERSION,
        "tags": tags,
    })
}

/// Write `<artifact>.provenance.json` next to a file or dataset directory with
/// the git commit, callsite, params, run stats and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut doc = base_block(&payload.tags);
    doc["callsite"] = json!({
        "file": callsite.file(),
        "line": callsite.line()
    });
    doc["params"] = payload.params;
    doc["stats"] = payload.stats;
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_sits_next_to_the_artifact() {
        let base = Path::new("/tmp/output/summary.csv");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/output/summary.provenance.json")
        );
        let dir = Path::new("data/run1");
        assert_eq!(provenance_path(dir), Path::new("data/run1.provenance.json"));
    }

    #[test]
    fn write_sidecar_records_params_and_tags() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("run");
        fs::create_dir_all(&artifact).unwrap();
        let mut payload = Payload::new(json!({"nodes": 50}));
        payload.tags.push("smoke".to_string());
        payload.stats = json!({"seed": 3});
        let prov_path = write_sidecar(&artifact, payload).unwrap();
        assert_eq!(prov_path, dir.path().join("run.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["nodes"], 50);
        assert_eq!(parsed["tags"][0], "smoke");
        assert_eq!(parsed["stats"]["seed"], 3);
        assert_eq!(parsed["scwalk_version"], scwalk::VERSION);
    }
}
