//! `package.json` written into every new app

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version every new app starts at
pub const INITIAL_VERSION: &str = "0.1.0";

/// Scripts section of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripts {
    pub start: String,
    pub build: String,
}

/// Package manifest for a new app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub private: bool,
    pub scripts: Scripts,
}

impl PackageManifest {
    /// Manifest whose scripts delegate to `scripts_command`
    pub fn new(name: &str, scripts_command: &str) -> Self {
        Self {
            name: name.to_string(),
            version: INITIAL_VERSION.to_string(),
            private: true,
            scripts: Scripts {
                start: format!("{} start", scripts_command),
                build: format!("{} build", scripts_command),
            },
        }
    }

    /// Pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).context("Failed to serialize package.json")?;
        json.push('\n');
        Ok(json)
    }

    /// Write `package.json` into `app_dir`
    pub fn write(&self, app_dir: &Path) -> Result<()> {
        let path = app_dir.join("package.json");
        std::fs::write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_invoke_build_tooling() {
        let manifest = PackageManifest::new("mega-viz", "sprout-scripts");
        assert_eq!(manifest.scripts.start, "sprout-scripts start");
        assert_eq!(manifest.scripts.build, "sprout-scripts build");
    }

    #[test]
    fn test_json_shape() {
        let json = PackageManifest::new("mega-viz", "sprout-scripts")
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["name"], "mega-viz");
        assert_eq!(value["private"], true);
        assert_eq!(value["version"], INITIAL_VERSION);
        assert_eq!(value["scripts"]["build"], "sprout-scripts build");
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_write_creates_package_json() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = PackageManifest::new("demo", "sprout-scripts");
        manifest.write(dir.path()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        let parsed: PackageManifest = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, manifest);
    }
}
