//! sprout-scripts - Build and dev-server commands for Sprout apps

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sprout_core::build::{self, env, BuildError, BuildPaths};
use sprout_core::output;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sprout-scripts")]
#[command(about = "Build and dev-server commands for Sprout apps")]
#[command(version)]
pub struct Args {
    /// App root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an optimized production build in ./build
    Build,
    /// Start the development server
    Start,
}

impl Command {
    fn mode(&self) -> &'static str {
        match self {
            Command::Build => build::PRODUCTION,
            Command::Start => build::DEVELOPMENT,
        }
    }

    fn command_var(&self) -> (&'static str, &'static str) {
        match self {
            Command::Build => (build::BUNDLER_ENV, build::DEFAULT_BUNDLER),
            Command::Start => (build::DEV_SERVER_ENV, build::DEFAULT_DEV_SERVER),
        }
    }
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

fn main() -> Result<()> {
    install_terminal_guards();

    let args = Args::parse();
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let paths = BuildPaths::from_root(root);

    // The process environment is settled before any runtime thread exists
    env::prepare(args.command.mode(), &paths.env_file)?;
    let (var, default) = args.command.command_var();
    let argv = env::command_from_env(var, default)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    match args.command {
        Command::Build => match rt.block_on(build::run_build(&paths, &argv)) {
            Ok(()) => Ok(()),
            // Unexpected failures surface with their full chain
            Err(BuildError::Internal(e)) => Err(e),
            Err(e) => {
                output::error(&e);
                if let BuildError::Compile { output: details } = &e {
                    eprintln!();
                    eprintln!("{}", details);
                }
                std::process::exit(e.exit_code());
            }
        },
        Command::Start => {
            let code = rt.block_on(build::run_dev_server(&paths, &argv))?;
            std::process::exit(code);
        }
    }
}
