//! Sprout Core - Shared library for the Sprout CLIs
//!
//! This library holds everything the two Sprout binaries do. The binaries
//! only parse arguments, pick a product configuration and map errors to
//! exit codes.
//!
//! # Architecture
//!
//! - **Console** - `output` for colored messages and the banner
//! - **Processes** - `command` for the fail-fast command wrapper
//! - **Scaffolding** - `scaffold` creates a new app from the template tree
//! - **Building** - `build` runs the production build pipeline and the dev server
//!
//! # Example Usage
//!
//! ```ignore
//! use sprout_core::command::SystemRunner;
//! use sprout_core::scaffold::{self, ScaffoldFlags, ScaffoldRequest};
//!
//! let request = ScaffoldRequest::new("my-app", ScaffoldFlags::default())?;
//! scaffold::run(&MyConfig, &request, &mut SystemRunner)?;
//! ```

pub mod build;
pub mod command;
pub mod output;
pub mod product;
pub mod scaffold;

// Re-export main types for convenience
pub use build::{BuildError, BuildPaths};
pub use command::{CommandError, CommandRunner, CommandSpec, SystemRunner};
pub use product::ProductConfig;
pub use scaffold::{ScaffoldError, ScaffoldFlags, ScaffoldRequest};
