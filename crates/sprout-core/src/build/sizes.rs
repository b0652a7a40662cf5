//! Gzip size measurement and the before/after report

use anyhow::{Context, Result};
use colored::Colorize;
use flate2::write::GzEncoder;
use flate2::Compression;
use regex::Regex;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Growth at or above this is flagged red
const FIFTY_KILOBYTES: i64 = 1024 * 50;

/// A hex content hash of at least four digits before an optional `.chunk`
static HASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)\.[0-9a-f]{4,}(\.chunk)?(\.js|\.css)$").expect("hash pattern is valid")
});

/// Gzip size per asset, keyed by hash-stripped relative path
pub type SizeSnapshot = BTreeMap<String, u64>;

/// One built asset with its size and change since the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSize {
    /// Path relative to the output directory, `/`-separated
    pub path: String,
    pub size: u64,
    pub previous: Option<u64>,
}

/// `static/js/main.1a2b3c.js` becomes `static/js/main.js`
pub fn strip_hash(relative: &str) -> String {
    HASH_RE.replace(relative, "$1$2$3").into_owned()
}

pub fn gzip_size(bytes: &[u8]) -> Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?.len() as u64)
}

/// Human-readable size, e.g. `1.21 KB`
pub fn format_size(bytes: i64) -> String {
    let abs = bytes.unsigned_abs() as f64;
    if abs < 1024.0 {
        return format!("{} B", bytes);
    }

    let (value, unit) = if abs < 1024.0 * 1024.0 {
        (abs / 1024.0, "KB")
    } else {
        (abs / (1024.0 * 1024.0), "MB")
    };

    let number = format!("{:.2}", value);
    let number = number.trim_end_matches('0').trim_end_matches('.');
    let sign = if bytes < 0 { "-" } else { "" };
    format!("{}{} {}", sign, number, unit)
}

/// Colored difference label; empty when unchanged or new
pub fn difference_label(current: u64, previous: Option<u64>) -> String {
    let Some(previous) = previous else {
        return String::new();
    };
    let difference = current as i64 - previous as i64;
    let size = format_size(difference);

    if difference >= FIFTY_KILOBYTES {
        format!("+{}", size).red().to_string()
    } else if difference > 0 {
        format!("+{}", size).yellow().to_string()
    } else if difference < 0 {
        size.green().to_string()
    } else {
        String::new()
    }
}

/// Gzip sizes of every `.js` and `.css` file under `output_dir`
pub fn measure(output_dir: &Path) -> Result<SizeSnapshot> {
    Ok(collect_assets(output_dir, &SizeSnapshot::new())?
        .into_iter()
        .map(|asset| (strip_hash(&asset.path), asset.size))
        .collect())
}

/// Current assets under `output_dir`, largest first, compared with `previous`
pub fn collect_assets(output_dir: &Path, previous: &SizeSnapshot) -> Result<Vec<AssetSize>> {
    let mut assets = Vec::new();
    if !output_dir.is_dir() {
        return Ok(assets);
    }

    for entry in WalkDir::new(output_dir).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to read {}", output_dir.display()))?;
        if !entry.file_type().is_file() || !is_measured(entry.path()) {
            continue;
        }

        let path = relative_slash_path(output_dir, entry.path())?;
        let bytes = std::fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        let size = gzip_size(&bytes)?;
        let previous = previous.get(&strip_hash(&path)).copied();

        assets.push(AssetSize {
            path,
            size,
            previous,
        });
    }

    assets.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    Ok(assets)
}

/// Report lines: size label padded to a common width, then the asset path
pub fn format_report(output_name: &str, assets: &[AssetSize]) -> Vec<String> {
    let labels: Vec<String> = assets
        .iter()
        .map(|asset| {
            let size = format_size(asset.size as i64);
            let difference = difference_label(asset.size, asset.previous);
            if difference.is_empty() {
                format!("  {}", size)
            } else {
                format!("  {} ({})", size, difference)
            }
        })
        .collect();

    let width = labels
        .iter()
        .map(|l| console::measure_text_width(l))
        .max()
        .unwrap_or(0);

    assets
        .iter()
        .zip(labels)
        .map(|(asset, label)| {
            let pad = width - console::measure_text_width(&label);
            let (dir, name) = match asset.path.rsplit_once('/') {
                Some((dir, name)) => (format!("{}/{}/", output_name, dir), name),
                None => (format!("{}/", output_name), asset.path.as_str()),
            };
            format!("{}{}  {}{}", label, " ".repeat(pad), dir.dimmed(), name.cyan())
        })
        .collect()
}

/// Print the "File sizes after gzip" report for assets under `output_dir`
pub fn print_report(output_dir: &Path, assets: &[AssetSize]) {
    let output_name = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| output_dir.display().to_string());

    println!("File sizes after gzip:");
    println!();
    for line in format_report(&output_name, assets) {
        println!("{}", line);
    }
    println!();
}

fn is_measured(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js") | Some("css")
    )
}

fn relative_slash_path(root: &Path, path: &Path) -> Result<String> {
    let relative: PathBuf = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?
        .to_path_buf();
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/"))
}
