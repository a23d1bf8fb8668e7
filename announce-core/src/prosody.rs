//! Speech-friendly text repair applied after rewriting. Deterministic, no
//! external calls.

use crate::request::Style;

/// Repair pass: pronounceable ampersands, pause markers after colons, then
/// the per-style terminal punctuation rules. The urgent rule runs before
/// the default-period rule so a bare urgent sentence ends in `!`, and the
/// friendly rule runs last; styles are mutually exclusive per request so at
/// most one of the two fires.
pub fn post_process(text: &str, style: Style) -> String {
    let mut t = text.trim().to_string();

    t = t.replace(" & ", " and ");
    t = pause_after_colons(&t);

    if style == Style::Urgent && !t.ends_with(['!', '.']) {
        t.push('!');
    }
    if !t.ends_with(['.', '!', '?']) {
        t.push('.');
    }
    if style == Style::Friendly && t.ends_with('!') {
        t.pop();
        t.push('.');
    }

    t
}

/// A colon followed by whitespace becomes a colon plus an em-dash pause
/// marker, which nudges the synthesis engine into a longer break.
fn pause_after_colons(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == ':' && chars.peek().is_some_and(|n| n.is_whitespace()) {
            while chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
            }
            out.push_str(" — ");
        }
    }
    out
}
