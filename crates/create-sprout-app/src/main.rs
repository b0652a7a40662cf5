//! create-sprout-app - Project scaffolding for Sprout apps

use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use sprout_core::command::SystemRunner;
use sprout_core::output;
use sprout_core::scaffold::{self, ScaffoldFlags, ScaffoldRequest};
use sprout_core::ProductConfig;
use std::path::PathBuf;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sprout product configuration
#[derive(Clone)]
pub struct SproutConfig;

impl ProductConfig for SproutConfig {
    fn name(&self) -> &'static str {
        "create-sprout-app"
    }

    fn display_name(&self) -> &'static str {
        "Sprout"
    }

    fn default_template_dir(&self) -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/app"))
    }

    fn template_dir_env(&self) -> &'static str {
        "SPROUT_TEMPLATE_DIR"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["react", "react-dom"]
    }

    fn dev_dependencies(&self) -> &'static [&'static str] {
        &["sprout-scripts"]
    }

    fn local_packages_dir(&self) -> PathBuf {
        // Sibling crates of this one, e.g. crates/sprout-scripts
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/.."))
    }

    fn scripts_command(&self) -> &'static str {
        "sprout-scripts"
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-sprout-app")]
#[command(about = "Create a new Sprout app")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    /// Directory to create the app in; its last segment becomes the app name
    #[arg(value_name = "app-name")]
    pub app_name: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Do not initialize a git repository
    #[arg(short = 'g', long = "no-git")]
    pub no_git: bool,

    /// Do not install dependencies
    #[arg(short = 'i', long = "no-install")]
    pub no_install: bool,

    /// Print what would happen without creating files or running commands
    #[arg(short = 'd', long = "dry-run")]
    pub dry_run: bool,

    /// Install dev dependencies from local checkouts (for development use)
    #[arg(short = 't', long)]
    pub testing: bool,

    /// Local directory to use as the template instead of the bundled one (for development use)
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

impl Args {
    fn flags(&self) -> ScaffoldFlags {
        ScaffoldFlags {
            git: !self.no_git,
            install: !self.no_install,
            dry_run: self.dry_run,
            testing: self.testing,
        }
    }
}

fn banner() -> String {
    output::banner(&[
        format!(
            "{} {}",
            "create-sprout-app".green().bold(),
            format!("v{}", CLI_VERSION).dimmed()
        ),
        "Scaffold a new Sprout app in one command".to_string(),
    ])
}

/// Restore the cursor on panic and exit 130 on Ctrl+C
fn install_terminal_guards() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();
}

fn main() {
    install_terminal_guards();

    let mut command = Args::command().before_help(banner());
    let matches = command.clone().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let Some(app) = args.app_name.clone() else {
        output::error("Please specify the app name:");
        eprintln!("  create-sprout-app {}", "<app-name>".green());
        eprintln!();
        let _ = command.print_help();
        std::process::exit(1);
    };

    let request = ScaffoldRequest::new(app, args.flags())
        .map(|r| r.with_template_dir(args.template_dir.clone()));

    let result =
        request.and_then(|request| scaffold::run(&SproutConfig, &request, &mut SystemRunner));

    if let Err(e) = result {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_hook_chains_to_default() {
        install_terminal_guards();

        let result = std::panic::catch_unwind(|| panic!("boom"));
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_invert_negative_switches() {
        let args = Args::try_parse_from(["create-sprout-app", "app", "-g", "-d"]).unwrap();
        let flags = args.flags();
        assert!(!flags.git);
        assert!(flags.install);
        assert!(flags.dry_run);
        assert!(!flags.testing);
    }
}
