//! App name and title derivation

use std::path::Path;

/// Final segment of the app path, if it has one
pub fn app_name(app_path: &Path) -> Option<String> {
    app_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}

/// Human title for an app name: `mega-viz` becomes `Mega Viz`
pub fn app_title(app_name: &str) -> String {
    app_name
        .split('-')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
