//! Log sanitization utilities
//!
//! Request and response bodies carry free-text ingredient descriptions that
//! can run to several paragraphs; these helpers keep each log entry short
//! and on one line, and keep API keys out of logs.

/// Byte budget for a body excerpt in a log line.
const EXCERPT_BYTES: usize = 256;

/// Largest char boundary of `s` that is `<= limit`.
fn boundary_at_or_before(s: &str, limit: usize) -> usize {
    s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= limit)
        .last()
        .unwrap_or(0)
}

/// One-line excerpt of `s` for logging.
///
/// Newlines are escaped. Bodies over the byte budget are cut on a char
/// boundary and tagged with their full length.
pub fn truncate_for_log(s: &str) -> String {
    let excerpt = if s.len() <= EXCERPT_BYTES {
        s
    } else {
        &s[..boundary_at_or_before(s, EXCERPT_BYTES)]
    };
    let one_line = excerpt.replace('\r', "").replace('\n', "\\n");

    if excerpt.len() == s.len() {
        one_line
    } else {
        format!("{one_line}... ({} bytes total)", s.len())
    }
}

/// Mask a secret for logging, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}
