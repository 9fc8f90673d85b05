//! Text measurement and wrapping.
//!
//! The layout pass measures text through these functions and the compositor
//! paints with them; both must see the identical line set or allocated
//! height and rendered content diverge. `wrap_parts` is the single
//! implementation, with `wrap_lines` layered on top for measurement.
//!
//! Widths are display widths (wide and combining characters aware), not
//! char counts.

use unicode_width::UnicodeWidthChar;

use crate::types::TextWrap;

/// Display width of a single character. Control characters count zero.
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// One wrapped line mapped back onto its source line.
///
/// `start..end` is the char range of the source line this part covers.
/// `text` usually equals that range verbatim; in ellipsis mode it may carry
/// one trailing `…` that has no source char.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapPart {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Wrap a single source line (no newlines) into parts per the wrap mode.
///
/// Always returns at least one part, so empty text still occupies a row.
pub fn wrap_parts(line: &str, max_width: usize, mode: TextWrap) -> Vec<WrapPart> {
    let line_width = string_width(line);
    if mode == TextWrap::None || line_width <= max_width {
        return vec![WrapPart {
            text: line.to_string(),
            start: 0,
            end: line.chars().count(),
        }];
    }

    match mode {
        TextWrap::Truncate => vec![truncate_part(line, max_width)],
        TextWrap::Ellipsis => vec![ellipsis_part(line, max_width)],
        TextWrap::Wrap => word_wrap(line, max_width),
        TextWrap::None => unreachable!(),
    }
}

/// Wrap already-split source lines, flattening the parts to plain strings.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max_width: usize, mode: TextWrap) -> Vec<String> {
    let mut result = Vec::with_capacity(lines.len());
    for line in lines {
        for part in wrap_parts(line.as_ref(), max_width, mode) {
            result.push(part.text);
        }
    }
    result
}

/// Measure text for the layout solver: `(width, height)` in cells.
///
/// With no width constraint (or wrap mode `none`) the text measures as-is:
/// widest literal line by line count. Otherwise it wraps at the available
/// width, clamped to at least one cell. Pure in its inputs, so the solver
/// may call it any number of times per pass.
pub fn measure_text(text: &str, max_width: Option<usize>, mode: TextWrap) -> (usize, usize) {
    if text.is_empty() {
        return (0, 0);
    }
    let lines: Vec<&str> = text.split('\n').collect();

    let unconstrained = max_width.is_none() || mode == TextWrap::None;
    if unconstrained {
        let width = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
        return (width, lines.len());
    }

    let avail = max_width.unwrap_or(0).max(1);
    let wrapped = wrap_lines(&lines, avail, mode);
    let width = wrapped.iter().map(|l| string_width(l)).max().unwrap_or(0);
    (width, wrapped.len())
}

/// Greedy word wrap over one line, breaking an oversized word
/// character-by-character. Each part is a contiguous char range of the
/// source; the space at a word break is consumed by the break itself.
fn word_wrap(line: &str, max_width: usize) -> Vec<WrapPart> {
    let max_width = max_width.max(1);
    let chars: Vec<char> = line.chars().collect();
    let mut parts = Vec::new();

    let mut start = 0;
    let mut width = 0;
    let mut last_space: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let w = char_width(chars[i]);
        if width + w > max_width && width > 0 {
            let break_at = match last_space {
                // A break opportunity exists and leaves a non-empty line.
                Some(sp) if sp > start => {
                    parts.push(make_part(&chars, start, sp));
                    sp + 1
                }
                _ => {
                    parts.push(make_part(&chars, start, i));
                    i
                }
            };
            start = break_at;
            width = 0;
            last_space = None;
            i = start;
            continue;
        }
        if chars[i] == ' ' {
            last_space = Some(i);
        }
        width += w;
        i += 1;
    }

    if start < chars.len() || parts.is_empty() {
        parts.push(make_part(&chars, start, chars.len()));
    }
    parts
}

fn make_part(chars: &[char], start: usize, end: usize) -> WrapPart {
    WrapPart {
        text: chars[start..end].iter().collect(),
        start,
        end,
    }
}

/// Longest prefix of `line` that fits in `max_width`.
fn truncate_part(line: &str, max_width: usize) -> WrapPart {
    let mut text = String::new();
    let mut width = 0;
    let mut end = 0;
    for c in line.chars() {
        let w = char_width(c);
        if width + w > max_width {
            break;
        }
        text.push(c);
        width += w;
        end += 1;
    }
    WrapPart { text, start: 0, end }
}

/// Prefix that fits in `max_width - 1` plus one ellipsis glyph.
///
/// Degenerate widths: 0 becomes empty, 1 becomes a bare ellipsis.
fn ellipsis_part(line: &str, max_width: usize) -> WrapPart {
    if max_width == 0 {
        return WrapPart {
            text: String::new(),
            start: 0,
            end: 0,
        };
    }
    if max_width == 1 {
        return WrapPart {
            text: "…".to_string(),
            start: 0,
            end: 0,
        };
    }
    let mut part = truncate_part(line, max_width - 1);
    if part.end < line.chars().count() {
        part.text.push('…');
    }
    part
}
