//! Node styling: the layout and paint attributes carried by every node.
//!
//! One `Style` holds both what the layout solver consumes (flex properties,
//! sizing, spacing, position) and what the compositor consumes (colors,
//! text attributes, border, clip, z-index, wrap mode). The taffy bridge
//! translates the layout half; the painter reads the rest directly.

use crate::types::{
    AlignItems, AlignSelf, BorderStyle, Color, Dimension, FlexDirection, FlexWrap, JustifyContent,
    Position, TextAlign, TextWrap,
};

/// Per-side cell counts for margin and padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const fn all(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Horizontal padding only, the common case for one-row chrome.
    pub const fn horizontal(value: u16) -> Self {
        Self {
            top: 0,
            right: value,
            bottom: 0,
            left: value,
        }
    }
}

/// Offsets for absolutely-positioned nodes. `None` leaves the side free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inset {
    pub top: Option<i16>,
    pub right: Option<i16>,
    pub bottom: Option<i16>,
    pub left: Option<i16>,
}

/// Layout plus paint attributes for one node.
///
/// Text attributes (`bold`/`dim`/`italic`/`underline`) and colors are
/// tri-state: `None` inherits from the nearest ancestor that sets them,
/// which is how a container's color scheme flows into bare text children.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    // -------------------------------------------------------------------------
    // Flex container
    // -------------------------------------------------------------------------
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    /// Gap between children on both axes.
    pub gap: u16,
    pub row_gap: Option<u16>,
    pub column_gap: Option<u16>,

    // -------------------------------------------------------------------------
    // Flex item
    // -------------------------------------------------------------------------
    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Dimension,
    pub align_self: AlignSelf,

    // -------------------------------------------------------------------------
    // Sizing and spacing
    // -------------------------------------------------------------------------
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub padding: Edges,
    pub margin: Edges,
    pub position: Position,
    pub inset: Inset,

    // -------------------------------------------------------------------------
    // Paint
    // -------------------------------------------------------------------------
    /// Foreground; `None` inherits, falling back to auto-contrast.
    pub fg: Option<Color>,
    /// Background fill; `None` inherits (and fills nothing itself).
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub border: BorderStyle,
    pub border_color: Option<Color>,
    /// Clip descendants to this node's inner rect.
    pub clip: bool,
    /// Paint layer; `None` inherits from the nearest ancestor that sets one.
    pub z_index: Option<i32>,
    pub wrap: TextWrap,
    pub text_align: TextAlign,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::default(),
            flex_wrap: FlexWrap::default(),
            justify_content: JustifyContent::default(),
            align_items: AlignItems::default(),
            gap: 0,
            row_gap: None,
            column_gap: None,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Auto,
            align_self: AlignSelf::default(),
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            padding: Edges::default(),
            margin: Edges::default(),
            position: Position::default(),
            inset: Inset::default(),
            fg: None,
            bg: None,
            bold: None,
            dim: None,
            italic: None,
            underline: None,
            border: BorderStyle::None,
            border_color: None,
            clip: false,
            z_index: None,
            wrap: TextWrap::default(),
            text_align: TextAlign::default(),
        }
    }
}

impl Style {
    /// Border width on each side, in cells. Borders are 1 cell wide when set.
    pub fn border_widths(&self) -> Edges {
        if self.border == BorderStyle::None {
            Edges::default()
        } else {
            Edges::all(1)
        }
    }
}
