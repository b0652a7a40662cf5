//! Colored console output shared by both binaries

use colored::Colorize;
use std::fmt::Display;

/// Print a step heading (e.g. "Writing package.json")
pub fn step(message: impl Display) {
    println!("{} {}", "->".blue(), message);
}

/// Print an informational line
pub fn info(message: impl Display) {
    println!("{}", message);
}

pub fn success(message: impl Display) {
    println!("{}", message.to_string().green());
}

pub fn warning(message: impl Display) {
    eprintln!("{} {}", "Warning:".yellow(), message);
}

pub fn error(message: impl Display) {
    eprintln!("{}", message.to_string().red());
}

/// Echo a command line before it runs
pub fn command(argv: &[String]) {
    println!("   {} {}", "$".dimmed(), argv.join(" ").dimmed());
}

/// Render a boxed banner around the given lines
///
/// Width is measured without ANSI escapes so colored lines stay aligned.
pub fn banner(lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|l| console::measure_text_width(l))
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 4);

    let mut out = format!("╭{}╮\n", rule);
    for line in lines {
        let pad = width - console::measure_text_width(line);
        out.push_str(&format!("│  {}{}  │\n", line, " ".repeat(pad)));
    }
    out.push_str(&format!("╰{}╯", rule));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_lines_share_width() {
        let rendered = banner(&["create-sprout-app".to_string(), "v0.1.0".to_string()]);
        let widths: Vec<usize> = rendered
            .lines()
            .map(console::measure_text_width)
            .collect();

        assert_eq!(widths.len(), 4);
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_banner_ignores_color_codes() {
        let plain = banner(&["sprout".to_string()]);
        let colored = banner(&["\x1b[1;32msprout\x1b[0m".to_string()]);

        assert_eq!(
            console::measure_text_width(plain.lines().nth(1).unwrap()),
            console::measure_text_width(colored.lines().nth(1).unwrap())
        );
    }

    #[test]
    fn test_banner_empty() {
        assert_eq!(banner(&[]), "╭────╮\n╰────╯");
    }
}
