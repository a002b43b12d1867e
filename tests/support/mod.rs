use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(".pacer.toml");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// A pacer command rooted at this test directory.
    pub fn pacer(&self) -> Command {
        let mut cmd = Command::cargo_bin("pacer").expect("pacer binary");
        cmd.arg("--dir").arg(self.dir.path());
        cmd
    }

    /// Run a command expecting success and parse its JSON envelope.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .pacer()
            .args(args)
            .arg("--json")
            .output()
            .expect("run pacer");
        assert!(
            output.status.success(),
            "pacer {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("valid JSON envelope")
    }

    /// Task ids for a project, in backlog order.
    pub fn task_ids(&self, project: &str) -> Vec<String> {
        let status = self.run_json(&["status", project]);
        status["data"]["project"]["tasks"]
            .as_array()
            .expect("tasks array")
            .iter()
            .map(|task| task["id"].as_str().expect("task id").to_string())
            .collect()
    }
}
