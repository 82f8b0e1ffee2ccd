//! Integration tests for CLI commands

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Helper to run kubeshow command
fn kubeshow(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_kubeshow"))
        .args(args)
        .env_remove("KUBESHOW_RENDERED")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute kubeshow")
}

const RENDERED: &str = r#"manifest: |
  ---
  # Source: web/templates/service.yaml
  apiVersion: v1
  kind: Service
  metadata:
    name: web
  ---
  # Source: web/templates/configmap.yaml
  apiVersion: v1
  kind: ConfigMap
  metadata:
    name: web
hooks:
  - name: web-test
    path: web/templates/tests/test-connection.yaml
    manifest: |
      apiVersion: v1
      kind: Pod
      metadata:
        name: web-test
    events: [test]
"#;

/// Chart directory with a serialized render next to it
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(chart_yaml: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web/Chart.yaml"), chart_yaml).unwrap();
        fs::write(dir.path().join("rendered.yaml"), RENDERED).unwrap();
        Self { dir }
    }

    fn application() -> Self {
        Self::new("apiVersion: v2\nname: web\nversion: 0.1.0\n")
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).display().to_string()
    }

    fn template(&self, extra: &[&str]) -> std::process::Output {
        let chart = self.path("web");
        let rendered = self.path("rendered.yaml");
        let mut args = vec!["template", chart.as_str(), "--rendered", rendered.as_str()];
        args.extend_from_slice(extra);
        kubeshow(&args)
    }
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

mod template_command {
    use super::*;

    #[test]
    fn test_stream_prints_whole_manifest() {
        let fixture = Fixture::application();
        let output = fixture.template(&[]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let out = stdout(&output);
        assert!(out.starts_with("---\n# Source: web/templates/service.yaml\n"));
        assert!(out.contains("# Source: web/templates/configmap.yaml"));
        assert!(out.contains("# Source: web/templates/tests/test-connection.yaml"));
    }

    #[test]
    fn test_skip_tests_drops_test_hooks() {
        let fixture = Fixture::application();
        let output = fixture.template(&["--skip-tests"]);

        assert!(output.status.success());
        assert!(!stdout(&output).contains("test-connection.yaml"));
    }

    #[test]
    fn test_no_hooks_drops_all_hooks() {
        let fixture = Fixture::application();
        let output = fixture.template(&["--no-hooks"]);

        assert!(output.status.success());
        assert!(!stdout(&output).contains("kind: Pod"));
    }

    #[test]
    fn test_show_only_exact_path() {
        let fixture = Fixture::application();
        let output = fixture.template(&["-s", "templates/service.yaml"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(
            stdout(&output),
            "---\n# Source: web/templates/service.yaml\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\n"
        );
    }

    #[test]
    fn test_show_only_glob_uses_canonical_order() {
        let fixture = Fixture::application();
        let output = fixture.template(&["--show-only", "templates/*.yaml"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let out = stdout(&output);
        let configmap = out.find("kind: ConfigMap").unwrap();
        let service = out.find("kind: Service").unwrap();
        assert!(configmap < service);
        // `*` does not cross directories
        assert!(!out.contains("test-connection.yaml"));
    }

    #[test]
    fn test_show_only_without_match_fails() {
        let fixture = Fixture::application();
        let output = fixture.template(&["--skip-tests", "-s", "templates/tests/test-connection.yaml"]);

        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(2));
        assert!(stderr(&output).contains("could not find template templates/tests/test-connection.yaml in chart"));
        assert!(stdout(&output).is_empty());
    }

    #[test]
    fn test_library_chart_is_rejected() {
        let fixture = Fixture::new("apiVersion: v2\nname: web\nversion: 0.1.0\ntype: library\n");
        let output = fixture.template(&[]);

        assert_eq!(output.status.code(), Some(4));
        assert!(stderr(&output).contains("not installable"));
    }

    #[test]
    fn test_missing_dependencies_are_listed() {
        let fixture = Fixture::new(
            "apiVersion: v2\nname: web\nversion: 0.1.0\ndependencies:\n  - name: redis\n  - name: postgresql\n",
        );
        let output = fixture.template(&[]);

        assert_eq!(output.status.code(), Some(4));
        let err = stderr(&output);
        assert!(err.contains("redis"));
        assert!(err.contains("postgresql"));
    }

    #[test]
    fn test_vendored_dependencies_satisfy_check() {
        let fixture = Fixture::new(
            "apiVersion: v2\nname: web\nversion: 0.1.0\ndependencies:\n  - name: redis\n",
        );
        fs::create_dir_all(fixture.dir.path().join("web/charts")).unwrap();
        fs::write(fixture.dir.path().join("web/charts/redis-17.3.2.tgz"), b"").unwrap();

        let output = fixture.template(&[]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    #[test]
    fn test_missing_chart_directory() {
        let fixture = Fixture::application();
        let missing = fixture.path("nope");
        let rendered = fixture.path("rendered.yaml");
        let output = kubeshow(&["template", &missing, "--rendered", &rendered]);

        assert!(!output.status.success());
        assert_eq!(output.status.code(), Some(4));
    }
}

mod output_dir {
    use super::*;

    fn read(dir: &Path, path: &str) -> String {
        fs::read_to_string(dir.join(path)).unwrap()
    }

    #[test]
    fn test_writes_one_file_per_template() {
        let fixture = Fixture::application();
        let out_dir = fixture.path("out");
        let output = fixture.template(&["--output-dir", &out_dir]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let out = stdout(&output);
        assert!(out.contains("wrote"));
        assert!(out.contains("service.yaml"));

        let out_dir = Path::new(&out_dir);
        assert_eq!(
            read(out_dir, "templates/service.yaml"),
            "---\n# Source: web/templates/service.yaml\napiVersion: v1\nkind: Service\nmetadata:\n  name: web\n"
        );
        assert!(read(out_dir, "templates/tests/test-connection.yaml").contains("kind: Pod"));
    }

    #[test]
    fn test_show_only_limits_written_files() {
        let fixture = Fixture::application();
        let out_dir = fixture.path("out");
        let output = fixture.template(&["--output-dir", &out_dir, "-s", "templates/configmap.yaml"]);

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        let out_dir = Path::new(&out_dir);
        assert!(out_dir.join("templates/configmap.yaml").exists());
        assert!(!out_dir.join("templates/service.yaml").exists());
    }

    #[test]
    fn test_rerun_overwrites_instead_of_appending() {
        let fixture = Fixture::application();
        let out_dir = fixture.path("out");

        assert!(fixture.template(&["--output-dir", &out_dir]).status.success());
        assert!(fixture.template(&["--output-dir", &out_dir]).status.success());

        let content = read(Path::new(&out_dir), "templates/service.yaml");
        assert_eq!(content.matches("kind: Service").count(), 1);
    }
}

mod cli {
    use super::*;

    #[test]
    fn test_help_lists_template() {
        let output = kubeshow(&["--help"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("template"));
    }

    #[test]
    fn test_rendered_is_required() {
        let output = kubeshow(&["template", "."]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("--rendered"));
    }
}
