//! Build environment: runtime mode, `.env` loading, command overrides

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable holding the runtime mode
pub const MODE_VAR: &str = "NODE_ENV";

/// Default the runtime mode, then load `env_file` if it exists
///
/// Variables already set in the process win over the file.
pub fn prepare(default_mode: &str, env_file: &Path) -> Result<()> {
    if std::env::var_os(MODE_VAR).is_none() {
        std::env::set_var(MODE_VAR, default_mode);
    }
    load_env_file(env_file)?;
    Ok(())
}

/// Load variables from `path`; returns false when the file is absent
pub fn load_env_file(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to load {}", path.display())),
    }
}

/// Command line from `var`, falling back to `default`, split like a shell would
pub fn command_from_env(var: &str, default: &str) -> Result<Vec<String>> {
    let line = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_command(&line).with_context(|| format!("Invalid command in {}: {}", var, line))
}

fn parse_command(line: &str) -> Result<Vec<String>> {
    let argv = shell_words::split(line)?;
    if argv.is_empty() {
        anyhow::bail!("command is empty");
    }
    Ok(argv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_respects_quotes() {
        let argv = parse_command("sh -c 'echo hi && exit 0'").unwrap();
        assert_eq!(argv, vec!["sh", "-c", "echo hi && exit 0"]);
    }

    #[test]
    fn test_parse_command_rejects_empty_and_unbalanced() {
        assert!(parse_command("   ").is_err());
        assert!(parse_command("sh -c 'oops").is_err());
    }

    #[test]
    fn test_command_from_env_falls_back_to_default() {
        let argv = command_from_env(
            "SPROUT_TEST_UNSET_BUNDLER",
            "npx webpack --mode production",
        )
        .unwrap();
        assert_eq!(argv, vec!["npx", "webpack", "--mode", "production"]);
    }

    #[test]
    fn test_missing_env_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_env_file(&dir.path().join(".env")).unwrap());
    }

    #[test]
    fn test_env_file_does_not_override_process() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(".env");
        std::fs::write(
            &file,
            "SPROUT_TEST_FROM_FILE=loaded\nSPROUT_TEST_PRESET=file\n",
        )
        .unwrap();
        std::env::set_var("SPROUT_TEST_PRESET", "process");

        assert!(load_env_file(&file).unwrap());

        assert_eq!(std::env::var("SPROUT_TEST_FROM_FILE").unwrap(), "loaded");
        assert_eq!(std::env::var("SPROUT_TEST_PRESET").unwrap(), "process");
    }
}
