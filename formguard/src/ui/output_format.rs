//! Themed status messages on stderr.
//!
//! Color is applied only when the caller says the writer supports it, so
//! redirected output stays plain.

use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::ui::theme::{color_for, ThemeEntry, ThemeMap};

fn print_message<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        let color = color_for(entry, theme);
        writeln!(writer, "{} {}", prefix.color(color).bold(), msg.color(color))
    } else {
        writeln!(writer, "{} {}", prefix, msg)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[info]", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[warn]", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_message(writer, "[error]", msg, ThemeEntry::Error, theme, supports_color)
}

pub fn print_success_message<W: Write>(
    writer: &mut W,
    msg: &str,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_message(writer, "[ok]", msg, ThemeEntry::Success, theme, supports_color)
}
