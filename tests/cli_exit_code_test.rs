#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// Same stand-in for `yolo export` as the adapter tests: broken checkpoints
// fail with a traceback, everything else gets a sibling artifact.
const FAKE_YOLO: &str = r#"
model=""
format=""
for arg in "$@"; do
  case "$arg" in
    model=*) model="${arg#model=}" ;;
    format=*) format="${arg#format=}" ;;
  esac
done
case "$model" in
  *broken.pt)
    echo "Traceback (most recent call last):" >&2
    echo "RuntimeError: PytorchStreamReader failed reading zip archive" >&2
    exit 1 ;;
esac
: > "${model%.pt}.$format"
"#;

struct Workspace {
    root: TempDir,
    models: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("fake_yolo.sh"), FAKE_YOLO).unwrap();
        let models = root.path().join("models");
        std::fs::create_dir(&models).unwrap();
        Self { root, models }
    }

    fn models(&self) -> &Path {
        &self.models
    }

    fn models_arg(&self) -> String {
        self.models().to_str().unwrap().to_string()
    }

    fn command_arg(&self) -> String {
        format!("sh,{}", self.root.path().join("fake_yolo.sh").display())
    }

    fn checkpoint(&self, name: &str) {
        std::fs::write(self.models().join(name), b"checkpoint").unwrap();
    }
}

fn pt2onnx(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pt2onnx"))
        .args(args)
        .env_remove("PT2ONNX_MODEL_DIR")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_completed_batch_exits_zero() {
    let ws = Workspace::new();
    ws.checkpoint("m1.pt");

    let output = pt2onnx(&["--model-dir", &ws.models_arg(), "--command", &ws.command_arg()]);

    assert_eq!(output.status.code(), Some(0));
    let report = stdout(&output);
    assert!(report.starts_with("Found 1 .pt files to convert in"));
    assert!(report.contains("\nProcessing m1.pt...\n"));
    assert!(report.contains("Successfully converted m1.pt to ONNX format.\n"));
    assert!(report.contains("\nConversion process finished.\n"));
    assert!(ws.models().join("m1.onnx").exists());
}

#[test]
fn test_failed_conversion_exit_status_depends_on_fail_on_error() {
    let ws = Workspace::new();
    ws.checkpoint("broken.pt");
    ws.checkpoint("good.pt");
    let models = ws.models_arg();
    let command = ws.command_arg();

    let lenient = pt2onnx(&["--model-dir", &models, "--command", &command]);
    assert_eq!(lenient.status.code(), Some(0));
    let report = stdout(&lenient);
    assert!(report.contains(
        "Error converting broken.pt: RuntimeError: PytorchStreamReader failed reading zip archive\n"
    ));
    assert!(report.contains("Successfully converted good.pt to ONNX format.\n"));
    assert!(report.contains("Converted 1 of 2 files (1 failed).\n"));

    let strict = pt2onnx(&[
        "--model-dir",
        &models,
        "--command",
        &command,
        "--fail-on-error",
    ]);
    assert_eq!(strict.status.code(), Some(2));
    assert!(stdout(&strict).contains("\nConversion process finished.\n"));
}

#[test]
fn test_missing_directory_exits_cleanly() {
    let ws = Workspace::new();
    let missing = ws.root.path().join("static/mediapipe");
    let missing = missing.to_str().unwrap();

    let output = pt2onnx(&["--model-dir", missing, "--command", &ws.command_arg()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        format!("Error: Directory not found at {}\n", missing)
    );
}

#[test]
fn test_missing_directory_exits_one_with_fail_on_error() {
    let ws = Workspace::new();
    let missing = ws.root.path().join("static/mediapipe");

    let output = pt2onnx(&[
        "--model-dir",
        missing.to_str().unwrap(),
        "--fail-on-error",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Error: Directory not found at"));
}

#[test]
fn test_no_checkpoints_exits_zero() {
    let ws = Workspace::new();
    std::fs::write(ws.models().join("notes.txt"), b"").unwrap();

    let output = pt2onnx(&["--model-dir", &ws.models_arg()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        format!("No .pt files found in {}\n", ws.models_arg())
    );
}

#[test]
fn test_invalid_configuration_exits_one() {
    let ws = Workspace::new();
    ws.checkpoint("m1.pt");

    let output = pt2onnx(&["--model-dir", &ws.models_arg(), "--suffix", "pt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(!ws.models().join("m1.onnx").exists());
}

#[test]
fn test_config_file_with_command_line_dry_run() {
    let ws = Workspace::new();
    ws.checkpoint("a.pt");
    let config_path = ws.root.path().join("pt2onnx.toml");
    std::fs::write(
        &config_path,
        format!(
            "[converter]\nmodel_dir = '{}'\n\n[exporter]\ncommand = ['sh', '{}']\n",
            ws.models_arg(),
            ws.root.path().join("fake_yolo.sh").display()
        ),
    )
    .unwrap();

    let output = pt2onnx(&["--config", config_path.to_str().unwrap(), "--dry-run"]);

    assert_eq!(output.status.code(), Some(0));
    let report = stdout(&output);
    assert!(report.contains("- a.pt\n"));
    assert!(!report.contains("Processing"));
    assert!(!ws.models().join("a.onnx").exists());
}

#[test]
fn test_config_file_fail_on_error_applies() {
    let ws = Workspace::new();
    ws.checkpoint("broken.pt");
    let config_path = ws.root.path().join("pt2onnx.toml");
    std::fs::write(
        &config_path,
        format!(
            "[converter]\nmodel_dir = '{}'\n\n[exporter]\ncommand = ['sh', '{}']\n\n[report]\nfail_on_error = true\n",
            ws.models_arg(),
            ws.root.path().join("fake_yolo.sh").display()
        ),
    )
    .unwrap();

    let output = pt2onnx(&["--config", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Error converting broken.pt:"));
}
