//! Shared helpers for CLI specs

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Signals that walk the built-in "urgent" flow (and the fallback catalog)
/// to completion
pub const URGENT_SCRIPT: &str = r#"
{"kind": "approval", "stage": "bte_confirm", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_finalize", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "bte_prepare", "operator": "bob", "approved": true}
{"kind": "test", "stage": "bte_test", "all_passed": true}
{"kind": "approval", "stage": "prod_finalize", "operator": "alice", "approved": true}
{"kind": "approval", "stage": "prod_prepare", "operator": "bob", "approved": true}
{"kind": "test", "stage": "prod_test", "all_passed": true}
{"kind": "approval", "stage": "close_confirm", "operator": "carol", "approved": true}
{"kind": "approval", "stage": "end_confirm", "operator": "carol", "approved": true}
"#;

/// Scratch directory holding the store, config and signal scripts of one test
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_path(&self) -> PathBuf {
        self.path().join("flows.json")
    }

    /// Write a file relative to the project root
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// `stagegate` with the store isolated to this project
    pub fn sg(&self) -> CliBuilder {
        CliBuilder::new(self)
    }
}

pub struct CliBuilder {
    cmd: Command,
    args: Vec<String>,
}

impl CliBuilder {
    fn new(project: &Project) -> Self {
        let mut cmd = Command::cargo_bin("stagegate").unwrap();
        cmd.current_dir(project.path())
            .env_remove("STAGEGATE_CONFIG")
            .env("RUST_LOG", "warn")
            .arg("--store")
            .arg(project.store_path());
        Self {
            cmd,
            args: Vec::new(),
        }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    pub fn passes(self) -> RunAssert {
        self.run(true)
    }

    pub fn fails(self) -> RunAssert {
        self.run(false)
    }

    fn run(mut self, success: bool) -> RunAssert {
        let output = self.cmd.args(&self.args).output().unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        assert_eq!(
            output.status.success(),
            success,
            "stagegate {:?} exited with {}\nstdout:\n{stdout}\nstderr:\n{stderr}",
            self.args,
            output.status,
        );
        RunAssert {
            stdout,
            stderr,
            code: output.status.code(),
        }
    }
}

pub struct RunAssert {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        self.stdout.clone()
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stdout),
            "stdout missing {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).not().eval(&self.stdout),
            "stdout unexpectedly has {needle:?}:\n{}",
            self.stdout
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            predicate::str::contains(needle).eval(&self.stderr),
            "stderr missing {needle:?}:\n{}",
            self.stderr
        );
        self
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.code, Some(expected));
        self
    }
}
