//! The compositor: resolved nodes in, a populated framebuffer out.
//!
//! Painting runs in two stages. First a pre-order walk collects every
//! visible node with its inherited clip rect and effective z-index
//! (inherited from the nearest ancestor that declares one). Then the
//! entries are stable-sorted by z-index -- ties keep tree order -- and
//! painted back-to-front: background, border, kind-specific content.
//!
//! Text content may carry embedded SGR styling. Wrap geometry is computed
//! on the stripped text, then each wrapped line's char range is mapped back
//! onto the parsed segments to recover per-character style, merged over the
//! inherited style attribute-by-attribute.

use crate::ansi::{parse_ansi, strip_ansi, SegmentStyle};
use crate::layout::{char_width, string_width, wrap_lines, wrap_parts};
use crate::renderer::buffer::FrameBuffer;
use crate::tree::{Node, NodeId, NodeKind, NodeTree};
use crate::types::{Attr, ClipRect, Color, NamedColor, TextAlign};

// =============================================================================
// Options and results
// =============================================================================

/// Which node owns the caret and where it sits in the flat text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorInfo {
    pub focus_id: String,
    /// Char offset into the input's value (newlines count one).
    pub position: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PaintOptions {
    pub cursor: Option<CursorInfo>,
    /// Report the caret's screen coordinate instead of painting a
    /// simulated caret glyph.
    pub use_native_cursor: bool,
}

/// Where the native caret should go, and what's behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorScreenPosition {
    pub x: i32,
    pub y: i32,
    /// Background under the caret, for contrast adjustment upstream.
    pub bg: Option<Color>,
}

#[derive(Debug, Clone, Default)]
pub struct PaintResult {
    /// Present when `use_native_cursor` is set and a focused input painted
    /// a visible caret this frame.
    pub cursor_position: Option<CursorScreenPosition>,
}

// =============================================================================
// Inherited style
// =============================================================================

/// Text styling resolved through the ancestor chain: for each field, the
/// nearest node (self first) that sets it wins.
#[derive(Debug, Clone, Copy, Default)]
struct InheritedStyle {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: Option<bool>,
    dim: Option<bool>,
    italic: Option<bool>,
    underline: Option<bool>,
}

fn inherited_style(tree: &NodeTree, id: NodeId) -> InheritedStyle {
    let mut out = InheritedStyle::default();
    let mut current = Some(id);
    while let Some(node) = current.and_then(|id| tree.get(id)) {
        let style = &node.style;
        out.fg = out.fg.or(style.fg);
        out.bg = out.bg.or(style.bg);
        out.bold = out.bold.or(style.bold);
        out.dim = out.dim.or(style.dim);
        out.italic = out.italic.or(style.italic);
        out.underline = out.underline.or(style.underline);
        current = node.parent;
    }
    out
}

/// Derive a readable foreground when none is set: light backgrounds get
/// black text, dark ones white. No background means terminal default.
fn auto_contrast_fg(explicit: Option<Color>, bg: Option<Color>) -> Option<Color> {
    explicit.or_else(|| {
        bg.map(|bg| {
            if bg.is_light() {
                Color::BLACK
            } else {
                Color::WHITE
            }
        })
    })
}

fn attrs_from(bold: Option<bool>, dim: Option<bool>, italic: Option<bool>, underline: Option<bool>) -> Attr {
    let mut attrs = Attr::empty();
    attrs.set(Attr::BOLD, bold.unwrap_or(false));
    attrs.set(Attr::DIM, dim.unwrap_or(false));
    attrs.set(Attr::ITALIC, italic.unwrap_or(false));
    attrs.set(Attr::UNDERLINE, underline.unwrap_or(false));
    attrs
}

// =============================================================================
// Entry collection
// =============================================================================

struct PaintEntry {
    id: NodeId,
    /// Clip inherited from ancestors; this node's own clip flag only
    /// affects its descendants.
    clip: ClipRect,
    z_index: i32,
}

fn collect_entries(
    tree: &NodeTree,
    id: NodeId,
    parent_clip: ClipRect,
    parent_z: i32,
    entries: &mut Vec<PaintEntry>,
) {
    let Some(node) = tree.get(id) else { return };
    if node.hidden {
        return;
    }

    let z_index = node.style.z_index.unwrap_or(parent_z);

    let child_clip = if node.style.clip {
        parent_clip.intersect(&ClipRect::new(
            node.layout.inner_x,
            node.layout.inner_y,
            node.layout.inner_width,
            node.layout.inner_height,
        ))
    } else {
        parent_clip
    };

    entries.push(PaintEntry {
        id,
        clip: parent_clip,
        z_index,
    });

    // Text and input are paint leaves; anything nested under them is the
    // caller's mistake and stays invisible.
    if matches!(node.kind, NodeKind::Box) {
        for &child in &node.children {
            collect_entries(tree, child, child_clip, z_index, entries);
        }
    }
}

// =============================================================================
// paint_tree
// =============================================================================

/// Paint the resolved forest into `fb`.
///
/// The framebuffer is cleared first, so after this returns every cell is
/// defined: blank where nothing painted, content elsewhere.
pub fn paint_tree(
    tree: &NodeTree,
    roots: &[NodeId],
    fb: &mut FrameBuffer,
    options: &PaintOptions,
) -> PaintResult {
    fb.clear();

    let screen = fb.bounds();
    let mut entries = Vec::new();
    for &root in roots {
        collect_entries(tree, root, screen, 0, &mut entries);
    }

    // Stable sort: equal z keeps pre-order tree position.
    entries.sort_by_key(|entry| entry.z_index);

    let mut result = PaintResult::default();
    for entry in &entries {
        if let Some(node) = tree.get(entry.id) {
            if let Some(cursor) = paint_node(tree, entry.id, node, fb, &entry.clip, options) {
                result.cursor_position = Some(cursor);
            }
        }
    }
    result
}

fn paint_node(
    tree: &NodeTree,
    id: NodeId,
    node: &Node,
    fb: &mut FrameBuffer,
    clip: &ClipRect,
    options: &PaintOptions,
) -> Option<CursorScreenPosition> {
    let rect = node.layout;
    if rect.width <= 0 || rect.height <= 0 {
        return None;
    }

    let inherited = inherited_style(tree, id);

    // 1. Background fill.
    if let Some(bg) = node.style.bg {
        fb.fill_rect(rect.x, rect.y, rect.width, rect.height, bg, Some(clip));
    }

    // 2. Border. Needs two cells each way or the corners collide.
    if let Some(chars) = node.style.border.chars() {
        if rect.width >= 2 && rect.height >= 2 {
            let fg = node.style.border_color;
            let bg = inherited.bg;
            let (x, y) = (rect.x, rect.y);
            let (right, bottom) = (rect.x + rect.width - 1, rect.y + rect.height - 1);

            fb.set_cell(x, y, chars.top_left, fg, bg, Attr::empty(), Some(clip));
            fb.set_cell(right, y, chars.top_right, fg, bg, Attr::empty(), Some(clip));
            fb.set_cell(x, bottom, chars.bottom_left, fg, bg, Attr::empty(), Some(clip));
            fb.set_cell(right, bottom, chars.bottom_right, fg, bg, Attr::empty(), Some(clip));
            for col in x + 1..right {
                fb.set_cell(col, y, chars.horizontal, fg, bg, Attr::empty(), Some(clip));
                fb.set_cell(col, bottom, chars.horizontal, fg, bg, Attr::empty(), Some(clip));
            }
            for row in y + 1..bottom {
                fb.set_cell(x, row, chars.vertical, fg, bg, Attr::empty(), Some(clip));
                fb.set_cell(right, row, chars.vertical, fg, bg, Attr::empty(), Some(clip));
            }
        }
    }

    // 3. Content.
    match &node.kind {
        NodeKind::Box => None,
        NodeKind::Text { text } => {
            paint_text(node, text, fb, clip, &inherited);
            None
        }
        NodeKind::Input {
            value,
            placeholder,
            multiline,
        } => paint_input(node, value, placeholder, *multiline, fb, clip, &inherited, options),
    }
}

// =============================================================================
// Text
// =============================================================================

fn paint_text(node: &Node, text: &str, fb: &mut FrameBuffer, clip: &ClipRect, inherited: &InheritedStyle) {
    let rect = node.layout;
    if text.is_empty() || rect.inner_width <= 0 || rect.inner_height <= 0 {
        return;
    }

    let base_fg = auto_contrast_fg(inherited.fg, inherited.bg);
    let mode = node.style.wrap;
    let align = node.style.text_align;
    let inner_width = rect.inner_width;

    let mut row = 0;
    'lines: for line in text.split('\n') {
        let stripped = strip_ansi(line);
        // Per-char styles, indexed by position in the stripped line.
        let styled: Vec<(char, SegmentStyle)> = parse_ansi(line)
            .into_iter()
            .flat_map(|segment| {
                let style = segment.style;
                segment
                    .text
                    .chars()
                    .map(move |c| (c, style))
                    .collect::<Vec<_>>()
            })
            .collect();

        for part in wrap_parts(&stripped, inner_width as usize, mode) {
            if row >= rect.inner_height {
                break 'lines;
            }

            let visible = string_width(&part.text) as i32;
            let offset_x = match align {
                TextAlign::Left => 0,
                TextAlign::Center => ((inner_width - visible) / 2).max(0),
                TextAlign::Right => (inner_width - visible).max(0),
            };

            let mut col = 0;
            for (i, ch) in part.text.chars().enumerate() {
                // An appended ellipsis has no source char; it borrows the
                // style of the last char it replaced.
                let source = (part.start + i).min(part.end.saturating_sub(1));
                let segment = styled.get(source).map(|&(_, s)| s).unwrap_or_default();

                let fg = segment.fg.or(base_fg);
                let bg = segment.bg.or(inherited.bg);
                let attrs = attrs_from(
                    segment.bold.or(inherited.bold),
                    segment.dim.or(inherited.dim),
                    segment.italic.or(inherited.italic),
                    segment.underline.or(inherited.underline),
                );

                let width = char_width(ch) as i32;
                if width > 0 {
                    fb.set_cell(
                        rect.inner_x + offset_x + col,
                        rect.inner_y + row,
                        ch,
                        fg,
                        bg,
                        attrs,
                        Some(clip),
                    );
                }
                col += width;
            }
            row += 1;
        }
    }
}

// =============================================================================
// Input
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn paint_input(
    node: &Node,
    value: &str,
    placeholder: &str,
    multiline: bool,
    fb: &mut FrameBuffer,
    clip: &ClipRect,
    inherited: &InheritedStyle,
    options: &PaintOptions,
) -> Option<CursorScreenPosition> {
    let rect = node.layout;
    if rect.inner_width <= 0 || rect.inner_height <= 0 {
        return None;
    }

    let display = if value.is_empty() { placeholder } else { value };
    let is_placeholder = value.is_empty() && !placeholder.is_empty();

    // Placeholder text gets a dimmed contrast gray rather than the input's
    // own foreground, so it reads as a hint.
    let placeholder_fg = match inherited.bg {
        Some(bg) if bg.is_light() => NamedColor::BlackBright,
        Some(_) => NamedColor::WhiteBright,
        None => NamedColor::BlackBright,
    };
    let text_fg = if is_placeholder {
        Some(Color::Named(placeholder_fg))
    } else {
        auto_contrast_fg(inherited.fg, inherited.bg)
    };
    let text_dim = if is_placeholder { Some(true) } else { inherited.dim };
    let attrs = attrs_from(inherited.bold, text_dim, inherited.italic, inherited.underline);

    let cursor = options
        .cursor
        .as_ref()
        .filter(|cursor| node.focus_id.as_deref() == Some(cursor.focus_id.as_str()));

    if multiline && !is_placeholder {
        paint_input_multiline(node, value, fb, clip, inherited, options, cursor, text_fg, attrs)
    } else {
        // Single line: literal characters, horizontal caret.
        let mut col = 0;
        for ch in display.chars() {
            if col >= rect.inner_width {
                break;
            }
            let width = char_width(ch) as i32;
            if width > 0 {
                fb.set_cell(
                    rect.inner_x + col,
                    rect.inner_y,
                    ch,
                    text_fg,
                    inherited.bg,
                    attrs,
                    Some(clip),
                );
            }
            col += width;
        }

        let cursor = cursor?;
        let caret_col = (cursor.position as i32).min(rect.inner_width - 1);
        let x = rect.inner_x + caret_col;
        let y = rect.inner_y;
        if !clip.contains(x, y) {
            return None;
        }
        if options.use_native_cursor {
            return Some(CursorScreenPosition { x, y, bg: inherited.bg });
        }
        paint_caret(fb, x, y, inherited);
        None
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_input_multiline(
    node: &Node,
    value: &str,
    fb: &mut FrameBuffer,
    clip: &ClipRect,
    inherited: &InheritedStyle,
    options: &PaintOptions,
    cursor: Option<&CursorInfo>,
    text_fg: Option<Color>,
    attrs: Attr,
) -> Option<CursorScreenPosition> {
    let rect = node.layout;
    let mode = node.style.wrap;
    let inner_width = rect.inner_width.max(1) as usize;
    let lines: Vec<&str> = value.split('\n').collect();
    let wrapped = wrap_lines(&lines, inner_width, mode);

    // Caret's wrapped (line, column) from its flat char offset.
    let caret = cursor.map(|cursor| {
        let mut position = cursor.position;
        let mut logical = lines.len().saturating_sub(1);
        let mut offset_in_line = lines.last().map_or(0, |l| l.chars().count());
        let mut running = 0usize;
        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if position <= running + len {
                logical = i;
                offset_in_line = position - running;
                break;
            }
            running += len + 1; // the newline itself
        }
        position = offset_in_line;

        let wrapped_before: usize = lines[..logical]
            .iter()
            .map(|line| wrap_parts(line, inner_width, mode).len())
            .sum();

        let parts = wrap_parts(lines[logical], inner_width, mode);
        let chars: Vec<char> = lines[logical].chars().collect();
        let mut subline = 0;
        let mut column = 0;
        for (i, part) in parts.iter().enumerate() {
            if position <= part.end {
                subline = i;
                let from = part.start.min(position);
                column = chars[from..position].iter().map(|&c| char_width(c)).sum::<usize>();
                break;
            }
        }
        (wrapped_before + subline, column)
    });

    // Keep the caret inside the inner rect.
    let scroll = caret.map_or(0, |(line, _)| {
        (line as i32 - rect.inner_height + 1).max(0)
    });

    for row in 0..rect.inner_height {
        let line_index = (scroll + row) as usize;
        let Some(line) = wrapped.get(line_index) else { break };
        let mut col = 0;
        for ch in line.chars() {
            if col >= rect.inner_width {
                break;
            }
            let width = char_width(ch) as i32;
            if width > 0 {
                fb.set_cell(
                    rect.inner_x + col,
                    rect.inner_y + row,
                    ch,
                    text_fg,
                    inherited.bg,
                    attrs,
                    Some(clip),
                );
            }
            col += width;
        }
    }

    let (caret_line, caret_col) = caret?;
    let screen_row = caret_line as i32 - scroll;
    if screen_row < 0 || screen_row >= rect.inner_height {
        return None;
    }
    let x = rect.inner_x + (caret_col as i32).min(rect.inner_width - 1);
    let y = rect.inner_y + screen_row;
    if !clip.contains(x, y) {
        return None;
    }
    if options.use_native_cursor {
        return Some(CursorScreenPosition { x, y, bg: inherited.bg });
    }
    paint_caret(fb, x, y, inherited);
    None
}

/// Simulated caret: invert colors under the caret, keeping the glyph if
/// there is one, else a half-block.
fn paint_caret(fb: &mut FrameBuffer, x: i32, y: i32, inherited: &InheritedStyle) {
    let existing = fb.get(x, y).copied();
    let ch = match existing {
        Some(cell) if cell.ch != ' ' && !cell.is_continuation() => cell.ch,
        _ => '▌',
    };
    let fg = inherited.bg.unwrap_or(Color::BLACK);
    let bg = inherited.fg.unwrap_or(Color::WHITE);
    let attrs = existing
        .map(|cell| cell.attrs & (Attr::BOLD | Attr::DIM | Attr::ITALIC))
        .unwrap_or_default();
    fb.set_cell(x, y, ch, Some(fg), Some(bg), attrs, None);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use crate::types::{BorderStyle, Dimension};

    fn fixed(width: u16, height: u16) -> Style {
        Style {
            width: Dimension::Cells(width),
            height: Dimension::Cells(height),
            ..Style::default()
        }
    }

    fn paint(tree: &mut NodeTree, roots: &[NodeId], width: u16, height: u16) -> FrameBuffer {
        tree.compute_layout(roots, width, height).unwrap();
        let mut fb = FrameBuffer::new(width, height);
        paint_tree(tree, roots, &mut fb, &PaintOptions::default());
        fb
    }

    fn row_text(fb: &FrameBuffer, y: i32) -> String {
        (0..fb.width() as i32)
            .filter_map(|x| fb.get(x, y))
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    #[test]
    fn text_paints_at_origin() {
        let mut tree = NodeTree::new();
        let text = tree.create(NodeKind::text("Hello"), Style::default()).unwrap();
        let fb = paint(&mut tree, &[text], 20, 3);
        assert!(row_text(&fb, 0).starts_with("Hello"));
    }

    #[test]
    fn background_fills_and_every_cell_defined() {
        let mut tree = NodeTree::new();
        let style = Style {
            bg: Some(Color::Rgb(10, 20, 30)),
            ..fixed(4, 2)
        };
        let node = tree.create(NodeKind::Box, style).unwrap();
        let fb = paint(&mut tree, &[node], 8, 4);

        assert_eq!(fb.get(0, 0).unwrap().bg, Some(Color::Rgb(10, 20, 30)));
        assert_eq!(fb.get(3, 1).unwrap().bg, Some(Color::Rgb(10, 20, 30)));
        assert_eq!(fb.get(4, 0).unwrap().bg, None);
        assert_eq!(fb.cells().len(), 32);
    }

    #[test]
    fn border_drawn_only_with_two_cells_each_way() {
        let mut tree = NodeTree::new();
        let bordered = Style {
            border: BorderStyle::Single,
            ..fixed(4, 3)
        };
        let node = tree.create(NodeKind::Box, bordered).unwrap();
        let fb = paint(&mut tree, &[node], 10, 5);
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
        assert_eq!(fb.get(3, 0).unwrap().ch, '┐');
        assert_eq!(fb.get(0, 2).unwrap().ch, '└');
        assert_eq!(fb.get(1, 0).unwrap().ch, '─');
        assert_eq!(fb.get(0, 1).unwrap().ch, '│');

        // One row tall: no border at all, no corrupted corners.
        let mut tree = NodeTree::new();
        let thin = Style {
            border: BorderStyle::Single,
            ..fixed(4, 1)
        };
        let node = tree.create(NodeKind::Box, thin).unwrap();
        let fb = paint(&mut tree, &[node], 10, 5);
        assert_eq!(fb.get(0, 0).unwrap().ch, ' ');
    }

    #[test]
    fn z_index_sorts_and_inherits() {
        let mut tree = NodeTree::new();
        let root = tree.create(NodeKind::Box, Style::default()).unwrap();

        let overlay = |z_index: Option<i32>| Style {
            z_index,
            position: crate::types::Position::Absolute,
            inset: crate::style::Inset {
                top: Some(0),
                left: Some(0),
                ..Default::default()
            },
            ..fixed(5, 1)
        };

        // Declared earlier but carrying z 10; the later subtree stays at 0.
        let raised = tree.create(NodeKind::Box, overlay(Some(10))).unwrap();
        let raised_text = tree.create(NodeKind::text("AAAAA"), Style::default()).unwrap();
        tree.append_child(raised, raised_text).unwrap();

        let flat = tree.create(NodeKind::Box, overlay(None)).unwrap();
        let flat_text = tree.create(NodeKind::text("BBBBB"), Style::default()).unwrap();
        tree.append_child(flat, flat_text).unwrap();

        tree.append_child(root, raised).unwrap();
        tree.append_child(root, flat).unwrap();

        let fb = paint(&mut tree, &[root], 10, 2);
        // The text child inherited z 10 from `raised`, so it paints over
        // `flat` even though `flat` comes later in tree order.
        assert!(row_text(&fb, 0).starts_with("AAAAA"));
    }

    #[test]
    fn equal_z_keeps_tree_order() {
        let mut tree = NodeTree::new();
        let root = tree.create(NodeKind::Box, Style::default()).unwrap();
        for label in ["first", "later"] {
            let child = tree
                .create(
                    NodeKind::text(label),
                    Style {
                        position: crate::types::Position::Absolute,
                        inset: crate::style::Inset {
                            top: Some(0),
                            left: Some(0),
                            ..Default::default()
                        },
                        ..Style::default()
                    },
                )
                .unwrap();
            tree.append_child(root, child).unwrap();
        }
        let fb = paint(&mut tree, &[root], 10, 2);
        assert!(row_text(&fb, 0).starts_with("later"));
    }

    #[test]
    fn clip_flag_confines_descendants() {
        let mut tree = NodeTree::new();
        let clipper = tree
            .create(
                NodeKind::Box,
                Style {
                    clip: true,
                    ..fixed(3, 1)
                },
            )
            .unwrap();
        let text = tree.create(NodeKind::text("overflowing"), Style {
            wrap: crate::types::TextWrap::None,
            ..Style::default()
        }).unwrap();
        tree.append_child(clipper, text).unwrap();

        let fb = paint(&mut tree, &[clipper], 20, 2);
        assert_eq!(row_text(&fb, 0).trim_end(), "ove");
    }

    #[test]
    fn auto_contrast_picks_readable_foreground() {
        let mut tree = NodeTree::new();
        let dark = tree
            .create(
                NodeKind::Box,
                Style {
                    bg: Some(Color::Rgb(10, 10, 10)),
                    ..Style::default()
                },
            )
            .unwrap();
        let text = tree.create(NodeKind::text("hi"), Style::default()).unwrap();
        tree.append_child(dark, text).unwrap();
        let fb = paint(&mut tree, &[dark], 10, 2);
        assert_eq!(fb.get(0, 0).unwrap().fg, Some(Color::WHITE));

        let mut tree = NodeTree::new();
        let light = tree
            .create(
                NodeKind::Box,
                Style {
                    bg: Some(Color::Rgb(240, 240, 240)),
                    ..Style::default()
                },
            )
            .unwrap();
        let text = tree.create(NodeKind::text("hi"), Style::default()).unwrap();
        tree.append_child(light, text).unwrap();
        let fb = paint(&mut tree, &[light], 10, 2);
        assert_eq!(fb.get(0, 0).unwrap().fg, Some(Color::BLACK));
    }

    #[test]
    fn embedded_sgr_overrides_inherited_per_char() {
        let mut tree = NodeTree::new();
        let parent = tree
            .create(
                NodeKind::Box,
                Style {
                    fg: Some(Color::Named(NamedColor::Cyan)),
                    bold: Some(true),
                    ..Style::default()
                },
            )
            .unwrap();
        let text = tree
            .create(NodeKind::text("a\u{1b}[31mb\u{1b}[0mc"), Style::default())
            .unwrap();
        tree.append_child(parent, text).unwrap();

        let fb = paint(&mut tree, &[parent], 10, 2);
        // 'a': inherited cyan bold.
        assert_eq!(fb.get(0, 0).unwrap().fg, Some(Color::Named(NamedColor::Cyan)));
        assert!(fb.get(0, 0).unwrap().attrs.contains(Attr::BOLD));
        // 'b': embedded red, still inheriting bold.
        assert_eq!(fb.get(1, 0).unwrap().fg, Some(Color::Named(NamedColor::Red)));
        assert!(fb.get(1, 0).unwrap().attrs.contains(Attr::BOLD));
        // 'c': after reset, colors inherit again but bold is pinned off.
        assert_eq!(fb.get(2, 0).unwrap().fg, Some(Color::Named(NamedColor::Cyan)));
        assert!(!fb.get(2, 0).unwrap().attrs.contains(Attr::BOLD));
    }

    #[test]
    fn text_align_right_and_center() {
        let mut tree = NodeTree::new();
        let right = tree
            .create(
                NodeKind::text("ab"),
                Style {
                    text_align: TextAlign::Right,
                    width: Dimension::Cells(6),
                    ..Style::default()
                },
            )
            .unwrap();
        let fb = paint(&mut tree, &[right], 6, 1);
        assert_eq!(row_text(&fb, 0), "    ab");

        let mut tree = NodeTree::new();
        let center = tree
            .create(
                NodeKind::text("ab"),
                Style {
                    text_align: TextAlign::Center,
                    width: Dimension::Cells(6),
                    ..Style::default()
                },
            )
            .unwrap();
        let fb = paint(&mut tree, &[center], 6, 1);
        assert_eq!(row_text(&fb, 0), "  ab  ");
    }

    #[test]
    fn hidden_subtrees_never_paint() {
        let mut tree = NodeTree::new();
        let root = tree.create(NodeKind::Box, Style::default()).unwrap();
        let text = tree.create(NodeKind::text("secret"), Style::default()).unwrap();
        tree.append_child(root, text).unwrap();
        tree.set_hidden(text, true).unwrap();

        let fb = paint(&mut tree, &[root], 10, 2);
        assert_eq!(row_text(&fb, 0).trim(), "");
    }

    #[test]
    fn focused_input_paints_simulated_caret() {
        let mut tree = NodeTree::new();
        let input = tree
            .create(NodeKind::input("abc"), fixed(10, 1))
            .unwrap();
        tree.set_focus_id(input, Some("field".into())).unwrap();
        tree.compute_layout(&[input], 10, 1).unwrap();

        let mut fb = FrameBuffer::new(10, 1);
        let options = PaintOptions {
            cursor: Some(CursorInfo {
                focus_id: "field".into(),
                position: 1,
            }),
            use_native_cursor: false,
        };
        let result = paint_tree(&tree, &[input], &mut fb, &options);
        assert!(result.cursor_position.is_none());

        // Caret sits on 'b' with inverted colors.
        let cell = fb.get(1, 0).unwrap();
        assert_eq!(cell.ch, 'b');
        assert_eq!(cell.fg, Some(Color::BLACK));
        assert_eq!(cell.bg, Some(Color::WHITE));
    }

    #[test]
    fn native_cursor_reports_position_and_bg() {
        let mut tree = NodeTree::new();
        let wrapper = tree
            .create(
                NodeKind::Box,
                Style {
                    bg: Some(Color::Rgb(1, 2, 3)),
                    ..Style::default()
                },
            )
            .unwrap();
        let input = tree.create(NodeKind::input("hello"), fixed(10, 1)).unwrap();
        tree.set_focus_id(input, Some("field".into())).unwrap();
        tree.append_child(wrapper, input).unwrap();
        tree.compute_layout(&[wrapper], 10, 2).unwrap();

        let mut fb = FrameBuffer::new(10, 2);
        let options = PaintOptions {
            cursor: Some(CursorInfo {
                focus_id: "field".into(),
                position: 3,
            }),
            use_native_cursor: true,
        };
        let result = paint_tree(&tree, &[wrapper], &mut fb, &options);
        let cursor = result.cursor_position.unwrap();
        assert_eq!((cursor.x, cursor.y), (3, 0));
        assert_eq!(cursor.bg, Some(Color::Rgb(1, 2, 3)));
    }

    #[test]
    fn multiline_input_scrolls_to_keep_caret_visible() {
        let mut tree = NodeTree::new();
        let style = Style {
            width: Dimension::Cells(10),
            height: Dimension::Cells(2),
            ..Style::default()
        };
        let input = tree.create(
            NodeKind::Input {
                value: "one\ntwo\nthree\nfour".into(),
                placeholder: String::new(),
                multiline: true,
            },
            style,
        )
        .unwrap();
        tree.set_focus_id(input, Some("area".into())).unwrap();
        tree.compute_layout(&[input], 10, 2).unwrap();

        // Caret at the end: on "four", the last of four wrapped lines.
        let mut fb = FrameBuffer::new(10, 2);
        let options = PaintOptions {
            cursor: Some(CursorInfo {
                focus_id: "area".into(),
                position: "one\ntwo\nthree\nfour".chars().count(),
            }),
            use_native_cursor: true,
        };
        let result = paint_tree(&tree, &[input], &mut fb, &options);

        // Window scrolled down so the visible rows are "three" and "four".
        assert!(row_text(&fb, 0).starts_with("three"));
        assert!(row_text(&fb, 1).starts_with("four"));
        let cursor = result.cursor_position.unwrap();
        assert_eq!((cursor.x, cursor.y), (4, 1));
    }

    #[test]
    fn placeholder_renders_dim_gray() {
        let mut tree = NodeTree::new();
        let input = tree
            .create(
                NodeKind::Input {
                    value: String::new(),
                    placeholder: "type...".into(),
                    multiline: false,
                },
                fixed(12, 1),
            )
            .unwrap();
        let fb = paint(&mut tree, &[input], 12, 1);
        let cell = fb.get(0, 0).unwrap();
        assert_eq!(cell.ch, 't');
        assert_eq!(cell.fg, Some(Color::Named(NamedColor::BlackBright)));
        assert!(cell.attrs.contains(Attr::DIM));
    }

    #[test]
    fn zero_sized_node_skips_paint_without_cursor() {
        let mut tree = NodeTree::new();
        let input = tree.create(NodeKind::input("x"), fixed(0, 0)).unwrap();
        tree.set_focus_id(input, Some("field".into())).unwrap();
        tree.compute_layout(&[input], 10, 2).unwrap();

        let mut fb = FrameBuffer::new(10, 2);
        let options = PaintOptions {
            cursor: Some(CursorInfo {
                focus_id: "field".into(),
                position: 0,
            }),
            use_native_cursor: true,
        };
        let result = paint_tree(&tree, &[input], &mut fb, &options);
        assert!(result.cursor_position.is_none());
    }
}
