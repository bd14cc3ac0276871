//! Terminal and JSON output for the CLI.
//!
//! In `--json` mode only [`Output::json`] and errors reach the terminal; every
//! other printer is silent so stdout stays machine readable.

use std::fmt::Display;
use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use camisa_commerce::catalog::Product;

/// Where a styled line goes.
enum Stream {
    Out,
    Err,
}

/// Output handler shared by every command.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn emit(&self, stream: Stream, marker: StyledObject<&str>, msg: impl Display) {
        if self.json {
            return;
        }
        match stream {
            Stream::Out => println!("{} {}", marker, msg),
            Stream::Err => eprintln!("{} {}", marker, msg),
        }
    }

    pub fn info(&self, msg: &str) {
        self.emit(Stream::Out, style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit(Stream::Out, style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        self.emit(Stream::Err, style("⚠").yellow(), msg);
    }

    /// Errors are printed in both modes.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.emit(Stream::Err, style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.emit(Stream::Err, style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// A `[name]` group label inside a header, preceded by a blank line.
    pub fn section(&self, name: &str) {
        if !self.json {
            println!("\n{}", style(format!("[{}]", name)).cyan());
        }
    }

    pub fn blank(&self) {
        if !self.json {
            println!();
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// Print text as-is, for content meant to be copied (order messages, links).
    pub fn raw(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to encode output: {}", e)),
        }
    }

    /// Product table: id, name, sizes, price, flags.
    pub fn product_table(&self, products: &[Product]) {
        if self.json {
            return;
        }
        const WIDTHS: [usize; 4] = [12, 32, 16, 10];

        let pad = |cols: [&str; 4]| -> String {
            cols.iter()
                .zip(WIDTHS)
                .map(|(col, width)| format!("{:width$}", col, width = width))
                .collect::<Vec<_>>()
                .join("  ")
        };

        println!("  {}", style(pad(["ID", "NAME", "SIZES", "PRICE"])).bold());
        for product in products {
            let name = truncate(&product.name, WIDTHS[1]);
            let sizes = product.sizes.join(",");
            let price = product.price.map(|p| p.display()).unwrap_or_else(|| "-".to_string());
            println!(
                "  {}  {}",
                pad([product.id.as_str(), &name, &sizes, &price]),
                flag_badges(product.on_sale, product.is_new)
            );
        }
    }

    /// Spinner while the catalog loads. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// `OFERTA` / `NUEVO` badges for product flags.
pub fn flag_badges(on_sale: bool, is_new: bool) -> String {
    let mut badges = Vec::new();
    if on_sale {
        badges.push(style("OFERTA").red().to_string());
    }
    if is_new {
        badges.push(style("NUEVO").green().to_string());
    }
    badges.join(" ")
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Camisa", 10), "Camisa");
        assert_eq!(truncate("Camisa Bordada Niños", 8), "Camisa …");
    }

    #[test]
    fn test_flag_badges_empty_without_flags() {
        assert_eq!(flag_badges(false, false), "");
    }
}
