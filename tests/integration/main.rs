//! Integration tests for pixi-discover

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    fn discover() -> Command {
        cargo_bin_cmd!("pixi-discover")
    }

    #[test]
    fn help_displays() {
        discover()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("find Python environments managed by pixi"));
    }

    #[test]
    fn version_displays() {
        discover()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pixi-discover"));
    }

    #[test]
    fn config_path() {
        discover()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_path_honours_flag() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        discover()
            .args(["config", "path", "--config"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("custom.toml"));
    }

    #[test]
    fn config_show() {
        let temp = tempfile::TempDir::new().unwrap();
        discover()
            .args(["config", "show", "--config"])
            .arg(temp.path().join("missing.toml"))
            .assert()
            .success()
            .stdout(predicate::str::contains("[tool]"))
            .stdout(predicate::str::contains("timeout_secs = 30"));
    }

    #[test]
    fn config_set_then_show() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        discover()
            .args(["config", "set", "tool.path", "/opt/pixi/bin/pixi", "--config"])
            .arg(&path)
            .assert()
            .success();

        discover()
            .args(["config", "show", "--config"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("/opt/pixi/bin/pixi"));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        discover()
            .args(["config", "set", "tool.colour", "red", "--config"])
            .arg(temp.path().join("config.toml"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[tool\npath = ").unwrap();

        discover()
            .args(["list", "--config"])
            .arg(&path)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn run_args_requires_manifest() {
        discover().arg("run-args").assert().failure();
    }
}

#[cfg(unix)]
mod fake_pixi_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// A project with a fake pixi reporting `default`, `gone` and `dev`,
    /// of which `gone` was never installed
    struct Fixture {
        temp: TempDir,
        project: PathBuf,
        pixi: PathBuf,
        config: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let project = temp.path().join("demo");
            let envs = project.join(".pixi").join("envs");
            for name in ["default", "dev"] {
                let bin = envs.join(name).join("bin");
                std::fs::create_dir_all(&bin).unwrap();
                std::fs::write(bin.join("python"), "").unwrap();
            }
            std::fs::write(project.join("pixi.toml"), "[workspace]\nname = \"demo\"\n").unwrap();

            let pixi = temp.path().join("fake-pixi");
            std::fs::write(&pixi, fake_pixi_script(&project)).unwrap();
            std::fs::set_permissions(&pixi, std::fs::Permissions::from_mode(0o755)).unwrap();

            let config = temp.path().join("config.toml");
            std::fs::write(
                &config,
                format!("[tool]\npath = \"{}\"\ntimeout_secs = 10\n", pixi.display()),
            )
            .unwrap();

            Self {
                temp,
                project,
                pixi,
                config,
            }
        }

        fn command(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("pixi-discover");
            cmd.env("PIXI_DISCOVER_CONFIG", &self.config)
                .env("HOME", self.temp.path())
                .env("PATH", self.temp.path().join("empty-path"));
            cmd
        }

        fn prefix(&self, name: &str) -> PathBuf {
            self.project.join(".pixi").join("envs").join(name)
        }
    }

    fn fake_pixi_script(project: &Path) -> String {
        let envs = project.join(".pixi").join("envs");
        let environment = |name: &str, solve_group: &str| {
            format!(
                r#"{{"name":"{name}","features":["{name}"],"solve_group":{solve_group},"environment_size":0,"dependencies":["python"],"tasks":[],"channels":["conda-forge"],"prefix":"{}"}}"#,
                envs.join(name).display()
            )
        };
        let info = format!(
            r#"{{"platform":"linux-64","virtual_packages":["__unix"],"version":"0.40.1","cache_dir":"/tmp/cache","auth_dir":"/tmp/auth","project_info":{{"manifest_path":"{}","last_updated":"2024-11-02","version":"0.1.0"}},"environments_info":[{},{},{}]}}"#,
            project.join("pixi.toml").display(),
            environment("default", r#""main""#),
            environment("gone", r#""main""#),
            environment("dev", "null"),
        );

        format!(
            "#!/bin/sh\ncase \"$1\" in\n  info) echo '{info}' ;;\n  --version) echo 'pixi 0.40.1' ;;\n  *) exit 1 ;;\nesac\n"
        )
    }

    #[test]
    fn list_json_skips_missing_prefixes() {
        let fixture = Fixture::new();

        let output = fixture
            .command()
            .args(["list", "--format", "json"])
            .arg(&fixture.project)
            .output()
            .unwrap();
        assert!(output.status.success());

        let found: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let found = found.as_array().unwrap();
        assert_eq!(found.len(), 2);

        let prefixes: Vec<&str> = found.iter().map(|e| e["prefix"].as_str().unwrap()).collect();
        assert_eq!(
            prefixes,
            vec![
                fixture.prefix("default").to_str().unwrap(),
                fixture.prefix("dev").to_str().unwrap(),
            ]
        );
        assert!(found.iter().all(|e| e["kind"] == "pixi"));
        assert_eq!(
            found[1]["executable"].as_str().unwrap(),
            fixture.prefix("dev").join("bin").join("python").to_str().unwrap()
        );
    }

    #[test]
    fn list_plain_prints_interpreters() {
        let fixture = Fixture::new();

        fixture
            .command()
            .args(["list", "--format", "plain"])
            .arg(&fixture.project)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                fixture.prefix("default").join("bin").join("python").to_str().unwrap(),
            ))
            .stdout(predicate::str::contains("gone").not());
    }

    #[test]
    fn info_json_round_trips() {
        let fixture = Fixture::new();

        let output = fixture
            .command()
            .args(["info", "--format", "json"])
            .arg(&fixture.project)
            .output()
            .unwrap();
        assert!(output.status.success());

        let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(info["version"], "0.40.1");
        let environments = info["environments_info"].as_array().unwrap();
        assert_eq!(environments.len(), 3);
        assert_eq!(environments[0]["solve_group"], "main");
        assert!(environments[2]["solve_group"].is_null());
    }

    #[test]
    fn locate_reports_configured_executable() {
        let fixture = Fixture::new();

        fixture
            .command()
            .arg("locate")
            .arg(&fixture.project)
            .assert()
            .success()
            .stdout(predicate::str::contains(fixture.pixi.to_str().unwrap()))
            .stdout(predicate::str::contains("0.40.1"));
    }

    #[test]
    fn locate_fails_without_pixi() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.config, "[tool]\npath = \"/nonexistent/pixi\"\n").unwrap();

        fixture
            .command()
            .arg("locate")
            .arg(&fixture.project)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Pixi not found"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn list_empty_without_pixi() {
        let fixture = Fixture::new();
        std::fs::write(&fixture.config, "[tool]\npath = \"/nonexistent/pixi\"\n").unwrap();

        fixture
            .command()
            .args(["list", "--format", "json"])
            .arg(&fixture.project)
            .assert()
            .success()
            .stdout(predicate::str::diff("[]\n"));
    }

    #[test]
    fn run_args_for_named_environment() {
        let fixture = Fixture::new();
        let manifest = fixture.project.join("pixi.toml");

        let expected = format!(
            "{} run --manifest-path {} --environment dev python -I bootstrap/interpreter_info.py",
            fixture.pixi.display(),
            manifest.display()
        );

        fixture
            .command()
            .args(["run-args", "--environment", "dev", "--isolated", "--manifest"])
            .arg(&manifest)
            .assert()
            .success()
            .stdout(predicate::str::contains(expected));
    }

    #[test]
    fn run_args_omits_default_environment() {
        let fixture = Fixture::new();
        let manifest = fixture.project.join("pixi.toml");

        let output = fixture
            .command()
            .args(["run-args", "--json", "--environment", "default", "--manifest"])
            .arg(&manifest)
            .output()
            .unwrap();
        assert!(output.status.success());

        let line: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
        assert!(!line.contains(&"--environment".to_string()));
        assert_eq!(line.last().unwrap(), "bootstrap/interpreter_info.py");
    }

    #[test]
    fn project_describes_interpreter() {
        let fixture = Fixture::new();
        let python = fixture.prefix("dev").join("bin").join("python");

        fixture
            .command()
            .arg("project")
            .arg(&python)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                fixture.project.join("pixi.toml").to_str().unwrap(),
            ))
            .stdout(predicate::str::contains("dev"));
    }
}
