use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ResolvedPaths {
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

/// Creates the log and output directories and checks the output one is writable.
pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;
    let output_dir = ensure_dir(&cfg.output_dir)?;
    probe_writable(&output_dir)?;
    Ok(ResolvedPaths {
        logs_dir,
        output_dir,
    })
}

fn probe_writable(dir: &Path) -> Result<()> {
    let probe_file = dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("output directory {} is not writable", dir.display()))?;
    fs::remove_file(&probe_file)?;
    Ok(())
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let cfg = DirectoryConfig {
            logs_dir: root.path().join("a/logs").display().to_string(),
            output_dir: root.path().join("b/out").display().to_string(),
        };
        let paths = ensure_directories(&cfg).unwrap();
        assert!(paths.logs_dir.is_dir());
        assert!(paths.output_dir.is_dir());
        assert!(!paths.output_file(".write-test").exists());
        assert_eq!(
            paths.output_file("report.json").file_name().and_then(|n| n.to_str()),
            Some("report.json")
        );
    }
}
