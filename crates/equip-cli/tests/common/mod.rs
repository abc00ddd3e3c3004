use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use url::Url;

/// An isolated environment: a file-backed collection plus its own HOME.
pub struct Sandbox {
    _dir: TempDir,
    pub db_root: PathBuf,
    pub home: PathBuf,
    pub api: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_root = dir.path().join("db");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&home).unwrap();

        let api = Url::from_directory_path(&db_root)
            .expect("Failed to convert path to file URL")
            .to_string();

        Self {
            _dir: dir,
            db_root,
            home,
            api,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_root.join("db.json")
    }

    /// Run the CLI binary with arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with(args, &[])
    }

    /// Run the CLI binary with extra environment variables.
    pub fn run_with(&self, args: &[&str], env: &[(&str, &str)]) -> Output {
        let mut cmd = command(&self.home);
        cmd.env("EQUIP_API_BASE_URL", &self.api);
        cmd.args(args);
        for (key, value) in env {
            cmd.env(key, value);
        }
        cmd.output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success, returning stdout.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Register a record and return its id.
    pub fn create(&self, name: &str) -> String {
        let stdout = self.run_success(&[
            "create",
            "--name",
            name,
            "--category",
            "Furniture",
            "--status",
            "available",
            "--quantity",
            "4",
            "--location",
            "Room A",
            "--purchase-date",
            "2024-01-15",
        ]);
        last_line(&stdout).to_string()
    }
}

fn command(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_equip"));
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("EQUIP_RECENT_LIMIT");
    cmd
}

pub fn last_line(s: &str) -> &str {
    s.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("").trim()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
