//! Build log.
//!
//! One line per event, `[stage] message`, cut to the terminal width so a long
//! collection list or output path never wraps:
//!
//! ```text
//! [config] ./cmsweave.toml not found, using defaults
//! [fetch] 3 collections: Blog Posts, Grade Levels, Topics
//! [resolve] grades -> Grade Levels
//! [bind] posts: 12 fragments into 1 container(s)
//! [warn] no `.topics-collection-list` container for 5 topics
//! [assets] css (4 files)
//! [build] 12 posts, 4 asset files -> dist/index.html
//! ```
//!
//! Prefix colors by stage:
//!
//! | Color   | Stages                        |
//! |---------|-------------------------------|
//! | blue    | `fetch`, `inspect`            |
//! | cyan    | `resolve`                     |
//! | green   | `bind`, `assets`, `build`     |
//! | magenta | `warn`                        |
//! | red     | `error`                       |
//! | yellow  | anything else, e.g. `config`  |

use colored::{Color, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

const STAGE_COLORS: &[(&[&str], Color)] = &[
    (&["fetch", "inspect"], Color::BrightBlue),
    (&["resolve"], Color::BrightCyan),
    (&["bind", "assets", "build"], Color::BrightGreen),
    (&["warn"], Color::BrightMagenta),
    (&["error"], Color::BrightRed),
];

const DEFAULT_COLOR: Color = Color::BrightYellow;

/// Used when stdout is not a terminal.
const DEFAULT_WIDTH: usize = 120;

static TERMINAL_WIDTH: OnceLock<usize> = OnceLock::new();

fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map_or(DEFAULT_WIDTH, |(columns, _)| columns.into()))
}

/// Log a line under a stage prefix.
///
/// ```ignore
/// log!("fetch"; "{} items from {}", items.len(), collection.display_name);
/// log!("warn"; "no collection for {}", role);
/// ```
#[macro_export]
macro_rules! log {
    ($stage:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($stage, &format!($($arg)*))
    }};
}

pub fn log(stage: &str, message: &str) {
    let prefix = format!("[{stage}]").color(stage_color(stage)).bold();
    // "[" + stage + "] "
    let room = terminal_width().saturating_sub(stage.chars().count() + 3);

    let mut out = stdout().lock();
    execute!(out, Clear(ClearType::UntilNewLine)).ok();
    writeln!(out, "{prefix} {}", fit_columns(message, room)).ok();
    out.flush().ok();
}

fn stage_color(stage: &str) -> Color {
    STAGE_COLORS
        .iter()
        .find(|(stages, _)| stages.iter().any(|s| s.eq_ignore_ascii_case(stage)))
        .map_or(DEFAULT_COLOR, |&(_, color)| color)
}

/// The first `columns` characters of `message`.
fn fit_columns(message: &str, columns: usize) -> &str {
    match message.char_indices().nth(columns) {
        Some((end, _)) => &message[..end],
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_colors() {
        assert_eq!(stage_color("fetch"), Color::BrightBlue);
        assert_eq!(stage_color("inspect"), Color::BrightBlue);
        assert_eq!(stage_color("resolve"), Color::BrightCyan);
        assert_eq!(stage_color("assets"), Color::BrightGreen);
        assert_eq!(stage_color("Warn"), Color::BrightMagenta);
        assert_eq!(stage_color("error"), Color::BrightRed);
        assert_eq!(stage_color("config"), DEFAULT_COLOR);
    }

    #[test]
    fn test_fit_columns_keeps_short_lines() {
        let line = "posts: 2 fragments into 1 container(s)";
        assert_eq!(fit_columns(line, 80), line);
        assert_eq!(fit_columns(line, line.len()), line);
    }

    #[test]
    fn test_fit_columns_cuts_long_lines() {
        assert_eq!(fit_columns("3 collections: Blog Posts, Topics", 13), "3 collections");
        assert_eq!(fit_columns("done", 0), "");
    }

    #[test]
    fn test_fit_columns_counts_chars() {
        // Collection names are user text and may be non-ASCII
        assert_eq!(fit_columns("Matemáticas Básicas", 11), "Matemáticas");
        assert_eq!(fit_columns("数学と美術", 2), "数学");
    }
}
