use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What a run was asked to do and what it measured.
pub struct Payload {
    pub input: PathBuf,
    pub params: Value,
    pub stats: Value,
    /// Extra artifacts written next to the main output (tables).
    pub extra_outputs: Vec<PathBuf>,
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar {
    code_rev: String,
    engine_version: &'static str,
    callsite: Callsite,
    input: String,
    params: Value,
    stats: Value,
    outputs: Vec<String>,
}

/// Write `<result-stem>.provenance.json` with the git commit, callsite, params, stats and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(result: P, payload: Payload) -> Result<PathBuf> {
    let result = result.as_ref();
    let sidecar_path = provenance_path(result);
    let callsite = Location::caller();
    let outputs = std::iter::once(result)
        .chain(payload.extra_outputs.iter().map(PathBuf::as_path))
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        engine_version: tphuim::VERSION,
        callsite: Callsite {
            file: callsite.file(),
            line: callsite.line(),
        },
        input: payload.input.to_string_lossy().into_owned(),
        params: payload.params,
        stats: payload.stats,
        outputs,
    };
    fs::write(&sidecar_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", sidecar_path.display()))?;
    Ok(sidecar_path)
}

fn provenance_path(result: &Path) -> PathBuf {
    let mut name = result
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("results"));
    name.push(".provenance.json");
    result.with_file_name(name)
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
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
