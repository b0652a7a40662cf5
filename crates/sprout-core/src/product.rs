//! Product configuration trait for the scaffolder binary
//!
//! The scaffolder binary implements this trait to describe what a new app
//! looks like: where the template tree lives, which packages get installed
//! and how the first commit is labelled.

use std::path::PathBuf;

/// Configuration trait for a scaffolded product
///
/// Defines:
/// - Product identity (CLI name, display name)
/// - Template tree location
/// - Dependency lists and the package manager that installs them
/// - Manifest scripts and the initial commit message
pub trait ProductConfig {
    /// CLI command name (shown in the banner and commit message)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template tree bundled with the binary
    fn default_template_dir(&self) -> PathBuf;

    /// Environment variable name for overriding the template directory
    fn template_dir_env(&self) -> &'static str;

    /// Runtime dependencies installed into every new app
    fn dependencies(&self) -> &'static [&'static str];

    /// Development dependencies installed into every new app
    fn dev_dependencies(&self) -> &'static [&'static str];

    /// Directory holding local checkouts of the dev dependencies
    /// (used by `--testing` instead of the registry)
    fn local_packages_dir(&self) -> PathBuf;

    /// Command that the manifest's `start` and `build` scripts invoke
    fn scripts_command(&self) -> &'static str;

    /// Package manager binary used for installation
    fn package_manager(&self) -> &'static str {
        "npm"
    }

    /// Message for the first git commit
    fn commit_message(&self) -> String {
        format!("Initial commit from {}", self.name())
    }

    /// Resolve the template directory, honouring the environment override
    fn template_dir(&self) -> PathBuf {
        std::env::var_os(self.template_dir_env())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_template_dir())
    }
}
