//! Bundler invocation

use anyhow::{Context, Result};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// What the bundler printed and how it exited
#[derive(Debug)]
pub struct CompileOutcome {
    pub status: ExitStatus,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl CompileOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// The bundler wrote diagnostics while still succeeding
    pub fn has_warnings(&self) -> bool {
        self.success() && self.stderr.iter().any(|l| !l.trim().is_empty())
    }

    /// Captured output, stdout first
    pub fn output(&self) -> String {
        self.stdout
            .iter()
            .chain(self.stderr.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Run the bundler in `cwd` and collect its output
///
/// Errors only when the bundler cannot be run at all; a bundler that runs
/// and fails is reported through [`CompileOutcome::success`].
pub async fn compile(argv: &[String], cwd: &Path) -> Result<CompileOutcome> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("Bundler command is empty"))?;
    let command_line = argv.join(" ");

    let mut child = TokioCommand::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start bundler `{}`", command_line))?;

    let stdout = child
        .stdout
        .take()
        .context("Failed to capture bundler stdout")?;
    let stderr = child
        .stderr
        .take()
        .context("Failed to capture bundler stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_lines = Vec::new();
    let mut stderr_lines = Vec::new();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line.context("Error reading bundler stdout")? {
                    Some(line) => stdout_lines.push(line),
                    None => stdout_open = false,
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line.context("Error reading bundler stderr")? {
                    Some(line) => stderr_lines.push(line),
                    None => stderr_open = false,
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for bundler `{}`", command_line))?;

    Ok(CompileOutcome {
        status,
        stdout: stdout_lines,
        stderr: stderr_lines,
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_collects_both_streams() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = compile(&sh("echo built; echo careful >&2"), dir.path())
            .await
            .unwrap();

        assert!(outcome.success());
        assert!(outcome.has_warnings());
        assert_eq!(outcome.stdout, vec!["built"]);
        assert_eq!(outcome.stderr, vec!["careful"]);
        assert_eq!(outcome.output(), "built\ncareful");
    }

    #[tokio::test]
    async fn test_failure_is_an_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = compile(&sh("echo 'Module not found' >&2; exit 1"), dir.path())
            .await
            .unwrap();

        assert!(!outcome.success());
        assert!(!outcome.has_warnings());
        assert!(outcome.output().contains("Module not found"));
    }

    #[tokio::test]
    async fn test_runs_in_project_root() {
        let dir = tempfile::tempdir().unwrap();
        compile(&sh("mkdir -p build && touch build/out.js"), dir.path())
            .await
            .unwrap();

        assert!(dir.path().join("build/out.js").is_file());
    }

    #[tokio::test]
    async fn test_missing_bundler_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = compile(&["sprout-no-such-bundler".to_string()], dir.path())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to start bundler"));
    }
}
