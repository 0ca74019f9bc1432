//! Text layout: greedy word wrap against an injected width measure.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

/// Wraps `text` into lines whose measured width fits `max_width`.
///
/// Tokens are whitespace-separated words; a line grows greedily while the
/// candidate (current line, space, next word) still measures within budget.
/// A single word that alone exceeds the budget is emitted whole on its own
/// line; content is never dropped or split mid-word. The trailing partial
/// line is emitted even when non-full.
///
/// Pure and cache-free: the source text and the budget can change every
/// frame, so each call recomputes from scratch.
pub fn wrap_text<F>(text: &str, max_width: usize, measure: F) -> Vec<String>
where
    F: Fn(&str) -> usize,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(token);
            continue;
        }

        let candidate = format!("{current} {token}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Measured width of `text` in terminal columns.
///
/// The standard measure for [`wrap_text`] when the budget is a column count.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }

    if emoji_get(grapheme).is_some() {
        return 2;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}
