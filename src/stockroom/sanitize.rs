//! Input sanitization applied before anything reaches the catalog.
//!
//! Text fields are HTML-entity escaped so stored markup can never render as markup.
//! Filenames are reduced to a bare, portable name so they cannot escape the uploads
//! directory.

/// Maximum filename length in bytes.
const MAX_FILENAME_BYTES: usize = 255;

const RESERVED_FILENAME_CHARS: &[char] = &['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

const WINDOWS_RESERVED_NAMES: &[&str] = &["con", "prn", "aux", "nul"];

/// Replace `& < > " ' / \` and backticks with HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            other => out.push(other),
        }
    }
    out
}

/// Reduce a user-supplied filename to a safe bare name.
///
/// Directory components are dropped first, then reserved and control characters,
/// dot-only names, Windows device names and trailing dots/spaces. The result may be
/// empty, which callers treat as "no file".
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .chars()
        .filter(|c| !RESERVED_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        return String::new();
    }

    let stem = cleaned.split('.').next().unwrap_or("").to_ascii_lowercase();
    if is_windows_device(&stem) {
        return String::new();
    }

    let trimmed = cleaned.trim_end_matches(['.', ' ']);
    truncate_bytes(trimmed, MAX_FILENAME_BYTES).to_string()
}

fn is_windows_device(stem: &str) -> bool {
    if WINDOWS_RESERVED_NAMES.contains(&stem) {
        return true;
    }
    let numbered = stem
        .strip_prefix("com")
        .or_else(|| stem.strip_prefix("lpt"));
    matches!(numbered, Some(n) if n.len() == 1 && n.chars().all(|c| c.is_ascii_digit()))
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
