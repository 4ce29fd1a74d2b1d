//! Integration tests for gxr
//!
//! None of these reach the network: registries hold immutable roots, cached
//! paths are seeded on disk, and the API endpoint points at a closed port.

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const DEAD_API: &str = "127.0.0.1:9";

    struct Env {
        dir: TempDir,
    }

    impl Env {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let env = Self { dir };
            std::fs::write(
                env.config_path(),
                format!(
                    "[cache]\npath = {:?}\n",
                    env.cache_path().display().to_string()
                ),
            )
            .unwrap();
            env
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn cache_path(&self) -> PathBuf {
            self.dir.path().join("gxcache")
        }

        fn gxr(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("gxr");
            cmd.arg("--config")
                .arg(self.config_path())
                .arg("--api")
                .arg(DEAD_API)
                .env_remove("RUST_LOG");
            cmd
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("gxr")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Resolve and query package repositories published on IPFS",
            ));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("gxr")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("gxr"));
    }

    #[test]
    fn config_path_uses_flag() {
        let env = Env::new();
        env.gxr()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn repo_ls_empty() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "ls"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No repositories configured"));
    }

    #[test]
    fn repo_add_then_ls() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "add", "pinned", "QmPinnedRoot"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added repository pinned"));

        env.gxr()
            .args(["repo", "ls", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("pinned\tQmPinnedRoot\n"));

        let config = std::fs::read_to_string(env.config_path()).unwrap();
        assert!(config.contains("[cache]"));
        assert!(config.contains("pinned = \"QmPinnedRoot\""));
    }

    #[test]
    fn repo_ls_json() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "add", "pinned", "QmPinnedRoot"])
            .assert()
            .success();

        let output = env.gxr().args(["repo", "ls", "-f", "json"]).output().unwrap();
        assert!(output.status.success());
        let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(parsed["pinned"], "QmPinnedRoot");
    }

    #[test]
    fn repo_add_duplicate_fails() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "add", "pinned", "QmPinnedRoot"])
            .assert()
            .success();

        env.gxr()
            .args(["repo", "add", "pinned", "QmOther"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Repository already exists: pinned"));
    }

    #[test]
    fn repo_rm_missing_fails() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "rm", "ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Repository not found: ghost"))
            .stderr(predicate::str::contains("gxr repo ls"));
    }

    #[test]
    fn repo_rm_removes_entry() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "add", "pinned", "QmPinnedRoot"])
            .assert()
            .success();
        env.gxr()
            .args(["repo", "rm", "pinned"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed repository pinned"));

        env.gxr()
            .args(["repo", "ls"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No repositories configured"));
    }

    #[test]
    fn repo_list_unknown_fails() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "list", "ghost"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Repository not found: ghost"));
    }

    #[test]
    fn repo_query_without_repositories() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "query", "pkg"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No repositories configured"));

        env.gxr()
            .args(["repo", "query", "pkg", "-f", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("{}"));
    }

    #[test]
    fn repo_query_network_failure_fails_whole_query() {
        let env = Env::new();
        env.gxr()
            .args(["repo", "add", "pinned", "QmPinnedRoot"])
            .assert()
            .success();

        env.gxr()
            .args(["repo", "query", "pkg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn resolve_uses_cache_without_network() {
        let env = Env::new();
        write(&env.cache_path(), r#"{"/ipns/QmKey":"QmCachedRoot"}"#);

        env.gxr()
            .args(["resolve", "/ipns/QmKey"])
            .assert()
            .success()
            .stdout(predicate::str::diff("QmCachedRoot\n"));
    }

    #[test]
    fn resolve_no_cache_hits_network() {
        let env = Env::new();
        write(&env.cache_path(), r#"{"/ipns/QmKey":"QmCachedRoot"}"#);

        env.gxr()
            .args(["resolve", "--no-cache", "/ipns/QmKey"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }

    #[test]
    fn cache_ls_plain() {
        let env = Env::new();
        write(
            &env.cache_path(),
            r#"{"/ipns/QmB":"QmRootB","/ipns/QmA":"QmRootA"}"#,
        );

        env.gxr()
            .args(["cache", "ls", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "/ipns/QmA\tQmRootA\n/ipns/QmB\tQmRootB\n",
            ));
    }

    #[test]
    fn corrupt_cache_is_reported() {
        let env = Env::new();
        write(&env.cache_path(), "not json at all");

        env.gxr()
            .args(["resolve", "/ipns/QmKey"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is corrupt"))
            .stderr(predicate::str::contains("gxr cache clear"));
    }

    #[test]
    fn cache_clear_requires_confirmation() {
        let env = Env::new();
        write(&env.cache_path(), r#"{"/ipns/QmKey":"QmRoot"}"#);

        env.gxr().args(["cache", "clear"]).assert().success();
        assert!(env.cache_path().exists());

        env.gxr()
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed"));
        assert!(!env.cache_path().exists());
    }

    #[test]
    fn cache_path_uses_config() {
        let env = Env::new();
        env.gxr()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gxcache"));
    }

    #[test]
    fn completions_bash() {
        cargo_bin_cmd!("gxr")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("gxr"));
    }
}
