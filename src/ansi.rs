//! ANSI SGR parser for text with embedded formatting.
//!
//! Content strings may carry `ESC [ <params> m` styling produced by other
//! tools. The compositor needs two views of such a string: the visible text
//! (for wrapping and width) and the per-character style (for painting).
//! `strip_ansi` gives the first, `parse_ansi` the second.
//!
//! Only SGR sequences are recognized; any other escape sequence is treated
//! as literal text. Unknown SGR codes are skipped, never fatal.

use crate::types::{Color, NamedColor};

/// Style carried by a parsed segment.
///
/// Every field is independently optional: a segment can set just the
/// foreground and leave the rest to be inherited. An explicit
/// `Some(false)` (from reset or a 22/23/24 clear) overrides an inherited
/// attribute, while `None` defers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentStyle {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

/// A run of text with the style in effect while it was emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledSegment {
    pub text: String,
    pub style: SegmentStyle,
}

/// Apply one SGR parameter list to a running style.
///
/// Codes 38/48 consume their extended-color arguments; everything
/// unrecognized is ignored.
fn apply_sgr_params(params: &[u16], style: &mut SegmentStyle) {
    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => *style = SegmentStyle {
                // Reset clears colors back to inherit but pins attributes
                // off, so reset text does not pick up an ancestor's bold.
                bold: Some(false),
                dim: Some(false),
                italic: Some(false),
                underline: Some(false),
                ..SegmentStyle::default()
            },
            1 => style.bold = Some(true),
            2 => style.dim = Some(true),
            3 => style.italic = Some(true),
            4 => style.underline = Some(true),
            22 => {
                style.bold = Some(false);
                style.dim = Some(false);
            }
            23 => style.italic = Some(false),
            24 => style.underline = Some(false),
            39 => style.fg = None,
            49 => style.bg = None,
            code @ (38 | 48) => {
                let color = match params.get(i + 1).copied() {
                    Some(5) => {
                        let c = params.get(i + 2).map(|&n| Color::Indexed(n as u8));
                        if c.is_some() {
                            i += 2;
                        }
                        c
                    }
                    Some(2) if params.len() > i + 4 => {
                        let (r, g, b) = (params[i + 2], params[i + 3], params[i + 4]);
                        i += 4;
                        Some(Color::Rgb(r as u8, g as u8, b as u8))
                    }
                    _ => None,
                };
                if let Some(color) = color {
                    if code == 38 {
                        style.fg = Some(color);
                    } else {
                        style.bg = Some(color);
                    }
                }
            }
            code @ 30..=37 | code @ 90..=97 => {
                style.fg = NamedColor::from_fg_code(code as u8).map(Color::Named);
            }
            code @ 40..=47 | code @ 100..=107 => {
                style.bg = NamedColor::from_fg_code(code as u8 - 10).map(Color::Named);
            }
            _ => {}
        }
        i += 1;
    }
}

/// If `rest` starts with an SGR sequence (`[<digits and ;>m`, already past
/// the ESC), return its parameter list and total char length including the
/// final `m`.
fn scan_sgr(rest: &str) -> Option<(Vec<u16>, usize)> {
    let mut chars = rest.chars();
    if chars.next() != Some('[') {
        return None;
    }
    let mut body = String::new();
    let mut len = 1;
    for c in chars {
        len += 1;
        match c {
            '0'..='9' | ';' => body.push(c),
            'm' => {
                let params = if body.is_empty() {
                    vec![0]
                } else {
                    // Empty components parse as 0, matching terminals.
                    body.split(';')
                        .map(|p| p.parse::<u16>().unwrap_or(0))
                        .collect()
                };
                return Some((params, len));
            }
            _ => return None,
        }
    }
    None
}

/// Parse a string with embedded SGR codes into styled segments.
///
/// Concatenating the segment texts reproduces `strip_ansi(input)` exactly:
/// parsing is lossless for the underlying text.
pub fn parse_ansi(input: &str) -> Vec<StyledSegment> {
    let mut segments = Vec::new();
    let mut style = SegmentStyle::default();
    let mut text = String::new();

    let mut rest = input;
    while let Some(esc) = rest.find('\u{1b}') {
        let (before, at_esc) = rest.split_at(esc);
        text.push_str(before);

        if let Some((params, len)) = scan_sgr(&at_esc[1..]) {
            if !text.is_empty() {
                segments.push(StyledSegment {
                    text: std::mem::take(&mut text),
                    style,
                });
            }
            apply_sgr_params(&params, &mut style);
            rest = &at_esc[1 + len..];
        } else {
            // Not an SGR sequence: the ESC is literal text.
            text.push('\u{1b}');
            rest = &at_esc[1..];
        }
    }
    text.push_str(rest);

    if !text.is_empty() {
        segments.push(StyledSegment { text, style });
    }
    segments
}

/// Remove all SGR escape sequences, leaving the visible text.
///
/// Idempotent: stripping a stripped string is a no-op.
pub fn strip_ansi(input: &str) -> String {
    if !input.contains('\u{1b}') {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(esc) = rest.find('\u{1b}') {
        let (before, at_esc) = rest.split_at(esc);
        out.push_str(before);
        if let Some((_, len)) = scan_sgr(&at_esc[1..]) {
            rest = &at_esc[1 + len..];
        } else {
            out.push('\u{1b}');
            rest = &at_esc[1..];
        }
    }
    out.push_str(rest);
    out
}
