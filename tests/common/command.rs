use assert_cmd::Command;
use std::path::Path;

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("TWIG_DIR")
        .env_remove("TWIG_DEFAULT_BRANCH")
        .env_remove("TWIG_LOG")
        .args(args);

    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    run_twig_command(dir, &["commit", "-m", message])
}

/// Run `rev-parse` and return the resolved object id
pub fn rev_parse(dir: &Path, revision: &str) -> String {
    let output = run_twig_command(dir, &["rev-parse", revision])
        .output()
        .expect("Failed to run rev-parse");
    assert!(output.status.success(), "rev-parse {revision} failed");

    String::from_utf8(output.stdout)
        .expect("rev-parse printed invalid UTF-8")
        .trim()
        .to_string()
}
