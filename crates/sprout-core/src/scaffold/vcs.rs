//! Git repository initialization for new apps

use crate::command::CommandSpec;
use crate::product::ProductConfig;
use std::path::Path;

/// Git runs only when enabled and the ignore file made it into the app
pub fn should_init(git_enabled: bool, app_dir: &Path) -> bool {
    git_enabled && app_dir.join(".gitignore").is_file()
}

/// init, stage everything, first commit
pub fn init_commands<C: ProductConfig>(config: &C) -> Vec<CommandSpec> {
    vec![
        CommandSpec::from("git init"),
        CommandSpec::from("git add -A"),
        CommandSpec::Args(vec![
            "git".to_string(),
            "commit".to_string(),
            "-m".to_string(),
            config.commit_message(),
        ]),
    ]
}
