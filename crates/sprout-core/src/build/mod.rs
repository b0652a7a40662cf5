//! Production build pipeline and dev server
//!
//! The build runs as a fixed sequence of stages, each awaited before the next:
//!
//! 1. Measure gzip sizes of the previous output (baseline)
//! 2. Copy static assets into the output directory
//! 3. Run the bundler
//! 4. Report sizes against the baseline
//!
//! A bundler that runs and fails is a [`BuildError::Compile`]. Anything
//! else that goes wrong is a [`BuildError::Internal`] and is not recovered.

pub mod assets;
pub mod compiler;
pub mod env;
pub mod sizes;

use crate::output;
use anyhow::Context;
use colored::Colorize;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command as TokioCommand;

/// Runtime mode for `build`
pub const PRODUCTION: &str = "production";

/// Runtime mode for `start`
pub const DEVELOPMENT: &str = "development";

/// Environment variable overriding the bundler command
pub const BUNDLER_ENV: &str = "SPROUT_BUNDLER";

/// Environment variable overriding the dev-server command
pub const DEV_SERVER_ENV: &str = "SPROUT_DEV_SERVER";

pub const DEFAULT_BUNDLER: &str = "npx webpack --mode production";

pub const DEFAULT_DEV_SERVER: &str = "npx webpack serve --mode development";

/// Locations inside an app that the build reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    pub root: PathBuf,
    pub output: PathBuf,
    pub assets: PathBuf,
    pub html_entry: PathBuf,
    pub env_file: PathBuf,
}

impl BuildPaths {
    /// Standard layout of a scaffolded app rooted at `root`
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            output: root.join("build"),
            assets: root.join("public"),
            html_entry: root.join("src").join("index.html"),
            env_file: root.join(".env"),
            root,
        }
    }
}

/// Reasons a build stops
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to compile.")]
    Compile { output: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BuildError {
    /// Exit code for the errors the runner handles itself
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Compile { .. } => 2,
            BuildError::Internal(_) => 1,
        }
    }
}

/// Run the production build with the given bundler command
pub async fn run_build(paths: &BuildPaths, bundler: &[String]) -> Result<(), BuildError> {
    let output_dir = paths.output.clone();
    let previous = blocking(move || sizes::measure(&output_dir)).await?;

    let copied = assets::copy_assets(&paths.assets, &paths.output, &paths.html_entry).await?;
    if copied > 0 {
        output::info(format!("Copied {} static file(s)", copied).dimmed());
    }

    output::info("Creating an optimized production build...");
    output::command(bundler);
    let outcome = compiler::compile(bundler, &paths.root).await?;

    if !outcome.success() {
        return Err(BuildError::Compile {
            output: outcome.output(),
        });
    }

    if outcome.has_warnings() {
        output::info("Compiled with warnings.".yellow());
        println!();
        println!("{}", outcome.stderr.join("\n"));
    } else {
        output::success("Compiled successfully.");
    }
    println!();

    let output_dir = paths.output.clone();
    let assets = blocking(move || sizes::collect_assets(&output_dir, &previous)).await?;
    sizes::print_report(&paths.output, &assets);
    Ok(())
}

/// Run filesystem-heavy work on the blocking pool
async fn blocking<T, F>(work: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("Size measurement task failed")?
}

/// Hand the terminal to the dev server and return its exit code
pub async fn run_dev_server(paths: &BuildPaths, command: &[String]) -> anyhow::Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("Dev server command is empty"))?;

    output::info("Starting the development server...");
    output::command(command);

    let status = TokioCommand::new(program)
        .args(args)
        .current_dir(&paths.root)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("Failed to start dev server `{}`", command.join(" ")))?;

    Ok(status.code().unwrap_or(1))
}
