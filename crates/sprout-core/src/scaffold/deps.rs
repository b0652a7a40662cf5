//! Dependency lists and installer commands

use crate::command::CommandSpec;
use crate::product::ProductConfig;

/// Development dependencies as passed to the package manager
///
/// With `testing`, each one points at its local checkout instead of the
/// registry so unpublished changes can be exercised.
pub fn dev_dependencies<C: ProductConfig>(config: &C, testing: bool) -> Vec<String> {
    config
        .dev_dependencies()
        .iter()
        .map(|name| {
            if testing {
                format!("file:{}", config.local_packages_dir().join(name).display())
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Runtime dependencies as passed to the package manager
pub fn dependencies<C: ProductConfig>(config: &C) -> Vec<String> {
    config
        .dependencies()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Install command for the given packages; lifecycle scripts are disabled
pub fn install_command<C: ProductConfig>(config: &C, packages: &[String], dev: bool) -> CommandSpec {
    let mut args = vec![
        config.package_manager().to_string(),
        "install".to_string(),
        if dev { "--save-dev" } else { "--save" }.to_string(),
        "--ignore-scripts".to_string(),
    ];
    args.extend(packages.iter().cloned());
    CommandSpec::Args(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::test_support::TestConfig;

    #[test]
    fn test_dev_dependencies_from_registry() {
        let config = TestConfig::new("/tmp/unused");
        assert_eq!(dev_dependencies(&config, false), vec!["sprout-scripts"]);
    }

    #[test]
    fn test_testing_rewrites_every_dev_dependency() {
        let config = TestConfig::new("/tmp/unused");
        let deps = dev_dependencies(&config, true);

        assert_eq!(deps.len(), config.dev_dependencies().len());
        for (dep, name) in deps.iter().zip(config.dev_dependencies()) {
            let expected = config.local_packages_dir().join(name);
            assert_eq!(dep, &format!("file:{}", expected.display()));
        }
    }

    #[test]
    fn test_testing_leaves_runtime_dependencies_alone() {
        let config = TestConfig::new("/tmp/unused");
        assert_eq!(dependencies(&config), vec!["react", "react-dom"]);
    }

    #[test]
    fn test_install_command_disables_scripts() {
        let config = TestConfig::new("/tmp/unused");
        let dev = install_command(&config, &dev_dependencies(&config, false), true);
        assert_eq!(
            dev.argv(),
            vec!["npm", "install", "--save-dev", "--ignore-scripts", "sprout-scripts"]
        );

        let prod = install_command(&config, &dependencies(&config), false);
        assert_eq!(
            prod.argv(),
            vec!["npm", "install", "--save", "--ignore-scripts", "react", "react-dom"]
        );
    }
}
