//! Subcommand implementations, one module per command.

pub mod expand;
pub mod sanitize;
pub mod strip_sql;
pub mod terms;
pub mod tracking_id;

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Reads the whole input file, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// A line reader over the input file, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = fs::File::open(path).with_context(|| format!("Failed to open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Applies `f` to every line of `text`, keeping line endings (including a
/// final newline) intact.
pub fn map_lines(text: &str, mut f: impl FnMut(&str) -> String) -> String {
    text.split('\n')
        .map(|line| match line.strip_suffix('\r') {
            Some(stripped) => format!("{}\r", f(stripped)),
            None => f(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_lines_keeps_endings() {
        let out = map_lines("a\r\nb\n\nc\n", |l| l.to_uppercase());
        assert_eq!(out, "A\r\nB\n\nC\n");
        assert_eq!(map_lines("", |l| l.to_string()), "");
    }
}
