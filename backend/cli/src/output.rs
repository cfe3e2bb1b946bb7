//! Terminal output: ANSI notes and the key/value settings table.

// ---------------------------------------------------------------------------
// ANSI Color/Style helpers
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            // Skip until 'm'
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Formatted notes
// ---------------------------------------------------------------------------

/// Print a formatted INFO note to stdout.
pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

/// Print a formatted WARNING note to stderr.
pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

// ---------------------------------------------------------------------------
// Settings table
// ---------------------------------------------------------------------------

/// Longest value shown in a table cell before truncation.
pub const MAX_VALUE_WIDTH: usize = 72;

/// Visible width in characters, ignoring ANSI codes.
fn visible_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/// Cut `s` to `max` characters, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Render `(key, value, note)` rows as an aligned two-column table.
///
/// `note` is shown dimmed after the value (e.g. an override marker).
pub fn render_settings_table(rows: &[(String, String, Option<String>)], color: bool) -> String {
    let key_width = rows
        .iter()
        .map(|(key, _, _)| visible_width(key))
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    let mut out = String::new();
    let header = format!("{:<key_width$}  VALUE", "KEY");
    if color {
        out.push_str(&format!("{BOLD}{header}{RESET}\n"));
    } else {
        out.push_str(&header);
        out.push('\n');
    }

    for (key, value, note) in rows {
        let pad = " ".repeat(key_width.saturating_sub(visible_width(key)));
        let value = truncate(value, MAX_VALUE_WIDTH);
        out.push_str(&format!("{key}{pad}  {value}"));
        if let Some(note) = note {
            if color {
                out.push_str(&format!("  {DIM}({note}){RESET}"));
            } else {
                out.push_str(&format!("  ({note})"));
            }
        }
        out.push('\n');
    }
    out
}
