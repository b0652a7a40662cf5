//! New app scaffolding
//!
//! This module provides:
//! - App name/title derivation
//! - The `package.json` written into every app
//! - Template tree copying with placeholder substitution
//! - Dependency installation and git initialization
//!
//! [`run`] chains these in order. Each step finishes before the next one
//! starts and any failure stops the whole run without rolling back.

pub mod deps;
pub mod manifest;
pub mod materialize;
pub mod naming;
pub mod vcs;

use crate::command::{CommandError, CommandRunner, CommandSpec};
use crate::output;
use crate::product::ProductConfig;
use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use manifest::PackageManifest;

/// Switches parsed from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldFlags {
    /// Initialize a git repository with a first commit
    pub git: bool,
    /// Install dependencies with the package manager
    pub install: bool,
    /// Log every step without touching the filesystem or running commands
    pub dry_run: bool,
    /// Install dev dependencies from local checkouts
    pub testing: bool,
}

impl Default for ScaffoldFlags {
    fn default() -> Self {
        Self {
            git: true,
            install: true,
            dry_run: false,
            testing: false,
        }
    }
}

/// A single request to create an app
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub app_path: PathBuf,
    pub app_name: String,
    pub app_title: String,
    pub flags: ScaffoldFlags,
    /// Overrides the product's template directory
    pub template_dir: Option<PathBuf>,
}

impl ScaffoldRequest {
    /// Resolve `app` against the current directory and derive its names
    pub fn new(app: impl AsRef<Path>, flags: ScaffoldFlags) -> Result<Self, ScaffoldError> {
        let app = app.as_ref();
        let app_path = std::path::absolute(app)
            .with_context(|| format!("Failed to resolve {}", app.display()))?;
        let app_name =
            naming::app_name(&app_path).ok_or_else(|| ScaffoldError::InvalidName(app_path.clone()))?;
        let app_title = naming::app_title(&app_name);

        Ok(Self {
            app_path,
            app_name,
            app_title,
            flags,
            template_dir: None,
        })
    }

    pub fn with_template_dir(mut self, template_dir: Option<PathBuf>) -> Self {
        self.template_dir = template_dir;
        self
    }
}

/// Reasons scaffolding stops
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("Cannot derive an app name from {0}")]
    InvalidName(PathBuf),

    #[error("The directory {0} already exists. Aborting.")]
    DirectoryExists(PathBuf),

    #[error("Template directory not found: {0}")]
    MissingTemplate(PathBuf),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl ScaffoldError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Create the app described by `request`
pub fn run<C: ProductConfig, R: CommandRunner>(
    config: &C,
    request: &ScaffoldRequest,
    runner: &mut R,
) -> Result<(), ScaffoldError> {
    let app_path = &request.app_path;
    let dry_run = request.flags.dry_run;

    output::info(format!(
        "Creating a new {} app in {}.",
        config.display_name(),
        app_path.display().to_string().green()
    ));
    println!();

    if app_path.exists() {
        return Err(ScaffoldError::DirectoryExists(app_path.clone()));
    }

    let template_dir = request
        .template_dir
        .clone()
        .unwrap_or_else(|| config.template_dir());
    if !template_dir.is_dir() {
        return Err(ScaffoldError::MissingTemplate(template_dir));
    }

    if !dry_run {
        std::fs::create_dir_all(app_path)
            .with_context(|| format!("Failed to create {}", app_path.display()))?;
    }

    output::step("Writing package.json");
    let manifest = PackageManifest::new(&request.app_name, config.scripts_command());
    if !dry_run {
        manifest.write(app_path)?;
    }

    output::step(format!("Copying template from {}", template_dir.display()));
    if !dry_run {
        let subs = materialize::substitutions(&request.app_name, &request.app_title);
        materialize::materialize(&template_dir, app_path, &subs)?;
    }

    install_dependencies(config, request, runner)?;
    init_git(config, request, runner)?;

    print_next_steps(config, request);
    Ok(())
}

fn install_dependencies<C: ProductConfig, R: CommandRunner>(
    config: &C,
    request: &ScaffoldRequest,
    runner: &mut R,
) -> Result<(), CommandError> {
    if !request.flags.install {
        output::info("Skipping dependency installation.".dimmed());
        return Ok(());
    }

    let dev = deps::dev_dependencies(config, request.flags.testing);
    output::step(format!("Installing devDependencies: {}", dev.join(", ").cyan()));
    exec(
        runner,
        request,
        &deps::install_command(config, &dev, true),
    )?;

    let prod = deps::dependencies(config);
    output::step(format!("Installing dependencies: {}", prod.join(", ").cyan()));
    exec(
        runner,
        request,
        &deps::install_command(config, &prod, false),
    )
}

fn init_git<C: ProductConfig, R: CommandRunner>(
    config: &C,
    request: &ScaffoldRequest,
    runner: &mut R,
) -> Result<(), CommandError> {
    if !vcs::should_init(request.flags.git, &request.app_path) {
        return Ok(());
    }

    output::step("Initializing git repository");
    for command in vcs::init_commands(config) {
        exec(runner, request, &command)?;
    }
    Ok(())
}

/// Echo the command, then run it in the app directory unless this is a dry run
fn exec<R: CommandRunner>(
    runner: &mut R,
    request: &ScaffoldRequest,
    command: &CommandSpec,
) -> Result<(), CommandError> {
    output::command(&command.argv());
    if request.flags.dry_run {
        return Ok(());
    }
    runner.run(command, &request.app_path)
}

fn print_next_steps<C: ProductConfig>(config: &C, request: &ScaffoldRequest) {
    let pm = config.package_manager();
    let start = format!("{} start", pm);
    let build = format!("{} run build", pm);

    println!();
    output::success(format!(
        "Success! Created {} at {}",
        request.app_name,
        request.app_path.display()
    ));
    println!("Inside that directory, you can run several commands:");
    println!();
    println!("  {}", start.cyan());
    println!("    Starts the development server.");
    println!();
    println!("  {}", build.cyan());
    println!("    Bundles the app into static files for production.");
    println!();
    println!("We suggest that you begin by typing:");
    println!();
    println!("  {} {}", "cd".cyan(), request.app_name);
    println!("  {}", start.cyan());
    println!();
    println!("Happy hacking!");
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::product::ProductConfig;
    use std::path::{Path, PathBuf};

    #[derive(Clone)]
    pub struct TestConfig {
        template_dir: PathBuf,
    }

    impl TestConfig {
        pub fn new(template_dir: impl Into<PathBuf>) -> Self {
            Self {
                template_dir: template_dir.into(),
            }
        }
    }

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "create-test-app"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn default_template_dir(&self) -> PathBuf {
            self.template_dir.clone()
        }

        fn template_dir_env(&self) -> &'static str {
            "SPROUT_TEST_TEMPLATE_DIR_UNSET"
        }

        fn dependencies(&self) -> &'static [&'static str] {
            &["react", "react-dom"]
        }

        fn dev_dependencies(&self) -> &'static [&'static str] {
            &["sprout-scripts"]
        }

        fn local_packages_dir(&self) -> PathBuf {
            PathBuf::from("/opt/sprout/packages")
        }

        fn scripts_command(&self) -> &'static str {
            "sprout-scripts"
        }
    }

    /// Minimal template tree with both substitution targets
    pub fn write_template(root: &Path) {
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("gitignore"), "node_modules\n").unwrap();
        std::fs::write(root.join("README.md"), "# __APP_TITLE__\n").unwrap();
        std::fs::write(
            root.join("src/index.html"),
            "<title>__APP_TITLE__</title>",
        )
        .unwrap();
    }
}
