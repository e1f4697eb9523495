//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

use crate::domain::Item;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Write section header (cyan bold)
pub fn header(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().cyan().bold())
}

/// Write indented label/value pair
pub fn detail(out: &mut impl Write, label: &str, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "  {}: {}", label.green(), msg)
}

/// Write plain output (no color, for data)
pub fn line(out: &mut impl Write, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Render one item line: id, then the dimmed type tag when requested.
pub fn format_item(item: &Item, show_type: bool) -> String {
    match (&item.kind, show_type) {
        (Some(kind), true) => format!("{} {}", item.id, format!("[{}]", kind).dimmed()),
        _ => item.id.to_string(),
    }
}

/// Write one line per item
pub fn items<'a>(
    out: &mut impl Write,
    items: impl IntoIterator<Item = &'a Item>,
    show_type: bool,
) -> io::Result<()> {
    for item in items {
        writeln!(out, "{}", format_item(item, show_type))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_hidden_types_when_formatting_then_only_id() {
        colored::control::set_override(false);
        let item = Item::new(2, 1).with_kind("test");
        assert_eq!(format_item(&item, false), "2");
        assert_eq!(format_item(&item, true), "2 [test]");
        assert_eq!(format_item(&Item::root("a"), true), "a");
    }

    #[test]
    fn given_items_when_writing_then_one_line_each() {
        let mut out = Vec::new();
        items(&mut out, &[Item::root(1), Item::new(2, 1)], false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1\n2\n");
    }
}
