use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const CLASSIC: &str = "Fill(Graft(Fill(Graft(Fill(Point(c), h), Fill(Point(a), i), c), β), \
                       Fill(Graft(Fill(Point(b), g), Fill(Point(a), f), b), α), i), A)";

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "opetope-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_opetope<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_opetope");
    Command::new(bin)
        .args(args)
        .env_remove("OPETOPE_LOG")
        .output()
        .expect("opetope command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
    assert_eq!(output.status.code(), Some(1));
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn eval_prints_conclusion() {
    let output = run_opetope(["eval", CLASSIC]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.starts_with(CLASSIC), "{stdout}");
    assert!(stdout.contains("  Dimension: 3"));
    assert!(stdout.contains("  Typing: A : β(i ← α) → h(c ← g(b ← f)) → a → ∅"));
    assert!(stdout.contains("  Context: A : "));
    assert!(stdout.contains("  Theory: ∅"));
}

#[test]
fn eval_json_summary() {
    let output = run_opetope(["eval", "--json", "Fill(Point(a), f)"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["expression"], "Fill(Point(a), f)");
    assert_eq!(payload["dimension"], 1);
    assert_eq!(payload["typing"], "f : a → ∅");
    assert_eq!(payload["theory"], serde_json::json!([]));
    assert_eq!(payload["context"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["fingerprint"].as_str().map(str::len), Some(64));
}

#[test]
fn eval_json_reports_theory_classes() {
    let output = run_opetope(["example", "degenerate", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["typing"], "β(i ← ι) : h → a → ∅");
    assert_eq!(payload["theory"], serde_json::json!([["a", "c"]]));
}

#[test]
fn eval_failure_names_scope() {
    let output = run_opetope(["eval", "Degen(Degen(Point(x)))"]);
    assert_failure(&output);
    let stderr = stderr_text(&output);
    assert!(stderr.contains("error: degen rule: "), "{stderr}");
}

#[test]
fn eval_failure_json() {
    let output = run_opetope([
        "eval",
        "--json",
        "Graft(Fill(Point(b), g), Fill(Point(b), f), b)",
    ]);
    assert_failure(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["ok"], false);
    assert_eq!(payload["scope"], "graft_rule");
    assert!(
        payload["message"]
            .as_str()
            .is_some_and(|m| m.contains("not needed"))
    );
}

#[test]
fn eval_rejects_malformed_expression() {
    let output = run_opetope(["eval", "Fill(Point(a)"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: syntax: "));
}

#[test]
fn eval_rejects_deeply_nested_expression() {
    let levels = 10_000;
    let expr = format!("{}Point(x){}", "Degen(".repeat(levels), ")".repeat(levels));
    let output = run_opetope(["eval", expr.as_str()]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: syntax: rules nested deeper than"));
}

#[test]
fn eval_reads_expression_file() {
    let tmp = TempDirGuard::new("eval-file");
    let path = tmp.path().join("classic.proof");
    fs::write(&path, format!("{CLASSIC}\n")).expect("proof file should be written");
    let output = run_opetope(["eval".as_ref(), "--file".as_ref(), path.as_os_str()]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("  Dimension: 3"));
}

#[test]
fn eval_tex_conclusion() {
    let output = run_opetope(["eval", "--tex", "--no-contexts", "Point(a)"]);
    assert_success(&output);
    assert_eq!(
        stdout_text(&output).trim_end(),
        "\\emptyset \\vdash_{0} a : \\emptyset"
    );
}

#[test]
fn config_file_sets_defaults() {
    let tmp = TempDirGuard::new("config");
    let path = tmp.path().join("opetope.toml");
    fs::write(&path, "[render]\nformat = \"json\"\nprint_contexts = false\n")
        .expect("config should be written");
    let output = run_opetope([
        "--config".as_ref(),
        path.as_os_str(),
        "eval".as_ref(),
        "Fill(Point(a), f)".as_ref(),
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["dimension"], 1);
    assert!(payload.get("context").is_none());
}

#[test]
fn missing_config_file_fails() {
    let output = run_opetope(["--config", "/nonexistent/opetope.toml", "eval", "Point(a)"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("failed to read config"));
}

#[test]
fn tex_prints_proof_tree() {
    let output = run_opetope(["tex", "Graft(Fill(Point(b), g), Fill(Point(a), f), b)"]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    assert!(stdout.starts_with("\\begin{prooftree}"));
    assert!(stdout.contains("\\RightLabel{\\texttt{graft-}$b$}"));
    assert!(stdout.contains("\\BinaryInfC{$\\emptyset \\smalltriangleright "));
    assert!(stdout.trim_end().ends_with("\\end{prooftree}"));
}

#[test]
fn example_list_and_run() {
    let output = run_opetope(["example", "--list"]);
    assert_success(&output);
    let stdout = stdout_text(&output);
    for name in ["arrow", "composition", "classic", "degenerate"] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }

    let output = run_opetope(["example", "composition"]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("  Typing: h(c ← g(b ← f)) : a → ∅"));
}

#[test]
fn unknown_example_fails() {
    let output = run_opetope(["example", "glue"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("unknown example `glue`"));
}

#[test]
fn verbose_logs_rule_applications_to_stderr() {
    let output = run_opetope(["-v", "eval", "Fill(Point(a), f)"]);
    assert_success(&output);
    let stderr = stderr_text(&output);
    assert!(stderr.contains("rule applied"), "{stderr}");
    assert!(!stdout_text(&output).contains("rule applied"));
}
