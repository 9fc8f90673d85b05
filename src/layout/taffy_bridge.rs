//! Translation between node styles and the taffy layout solver.
//!
//! Taffy is the external constraint solver: every structural node owns one
//! taffy node for its whole lifetime, and this module is the only place
//! that speaks taffy's vocabulary. Style changes re-translate here; text
//! and input leaves size themselves through [`measure_content`], which the
//! solver may invoke any number of times per pass and which is a pure
//! function of the node's current content.

use taffy::{
    AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf, AvailableSpace, Dimension as TaffyDimension,
    Display, FlexDirection as TaffyFlexDirection, FlexWrap as TaffyFlexWrap,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto,
    Position as TaffyPosition, Rect, Size,
};

use crate::ansi::strip_ansi;
use crate::layout::text_measure::{measure_text, string_width};
use crate::style::{Inset, Style};
use crate::tree::NodeKind;
use crate::types::{
    AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent, Position, TextWrap,
};

// =============================================================================
// Primitive conversions
// =============================================================================

fn dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn justify_content(justify: JustifyContent) -> TaffyJustifyContent {
    match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    }
}

fn align_items(align: AlignItems) -> TaffyAlignItems {
    match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    }
}

fn align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None,
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

fn inset(inset: Inset) -> Rect<LengthPercentageAuto> {
    let side = |v: Option<i16>| match v {
        Some(n) => LengthPercentageAuto::Length(n as f32),
        None => LengthPercentageAuto::Auto,
    };
    Rect {
        top: side(inset.top),
        right: side(inset.right),
        bottom: side(inset.bottom),
        left: side(inset.left),
    }
}

// =============================================================================
// Style building
// =============================================================================

/// Build the solver-side style for a node.
///
/// Hidden nodes become `Display::None` so they take no space and their
/// subtree is skipped by the solver. Text leaves keep `Auto` size and are
/// measured through the callback instead.
pub(crate) fn taffy_style(style: &Style, kind: &NodeKind, hidden: bool) -> taffy::Style {
    let border = style.border_widths();
    let gap_width = style.column_gap.unwrap_or(style.gap);
    let gap_height = style.row_gap.unwrap_or(style.gap);

    let mut out = taffy::Style {
        display: if hidden { Display::None } else { Display::Flex },
        position: match style.position {
            Position::Relative => TaffyPosition::Relative,
            Position::Absolute => TaffyPosition::Absolute,
        },
        inset: inset(style.inset),

        flex_direction: flex_direction(style.flex_direction),
        flex_wrap: flex_wrap(style.flex_wrap),
        justify_content: Some(justify_content(style.justify_content)),
        align_items: Some(align_items(style.align_items)),

        flex_grow: style.flex_grow,
        flex_shrink: style.flex_shrink,
        flex_basis: dimension(style.flex_basis),
        align_self: align_self(style.align_self),

        size: Size {
            width: dimension(style.width),
            height: dimension(style.height),
        },
        min_size: Size {
            width: dimension(style.min_width),
            height: dimension(style.min_height),
        },
        max_size: Size {
            width: dimension(style.max_width),
            height: dimension(style.max_height),
        },

        margin: Rect {
            top: LengthPercentageAuto::Length(style.margin.top as f32),
            right: LengthPercentageAuto::Length(style.margin.right as f32),
            bottom: LengthPercentageAuto::Length(style.margin.bottom as f32),
            left: LengthPercentageAuto::Length(style.margin.left as f32),
        },
        padding: Rect {
            top: LengthPercentage::Length(style.padding.top as f32),
            right: LengthPercentage::Length(style.padding.right as f32),
            bottom: LengthPercentage::Length(style.padding.bottom as f32),
            left: LengthPercentage::Length(style.padding.left as f32),
        },
        border: Rect {
            top: LengthPercentage::Length(border.top as f32),
            right: LengthPercentage::Length(border.right as f32),
            bottom: LengthPercentage::Length(border.bottom as f32),
            left: LengthPercentage::Length(border.left as f32),
        },
        gap: Size {
            width: LengthPercentage::Length(gap_width as f32),
            height: LengthPercentage::Length(gap_height as f32),
        },

        ..Default::default()
    };

    // Content-measured leaves size through the measure callback; an explicit
    // width/height on the node still wins because taffy passes it back as a
    // known dimension.
    if kind.is_measured_leaf() && style.width == Dimension::Auto && style.height == Dimension::Auto {
        out.size = Size::auto();
    }

    out
}

// =============================================================================
// Leaf measurement
// =============================================================================

/// Measure callback for text and input leaves.
///
/// Embedded SGR styling is stripped before measuring so escape bytes never
/// count toward width; the compositor strips with the same function before
/// wrapping, keeping measured and painted line sets identical.
pub(crate) fn measure_content(
    kind: &NodeKind,
    wrap: TextWrap,
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
) -> Size<f32> {
    let (content, wrap) = match kind {
        NodeKind::Text { text } => (strip_ansi(text), wrap),
        NodeKind::Input {
            value,
            placeholder,
            multiline,
        } => {
            let shown = if value.is_empty() { placeholder } else { value };
            if *multiline {
                (shown.clone(), wrap)
            } else {
                // Single-line inputs never reflow.
                let width = string_width(shown).max(1);
                return Size {
                    width: known.width.unwrap_or(width as f32),
                    height: known.height.unwrap_or(1.0),
                };
            }
        }
        NodeKind::Box => return Size::ZERO,
    };

    if content.is_empty() {
        return Size::ZERO;
    }

    let avail_width = match known.width {
        Some(w) => Some(w.floor().max(0.0) as usize),
        None => match available.width {
            AvailableSpace::Definite(w) => Some(w.floor().max(0.0) as usize),
            AvailableSpace::MinContent | AvailableSpace::MaxContent => None,
        },
    };

    let (width, height) = measure_text(&content, avail_width, wrap);
    Size {
        width: known.width.unwrap_or(width as f32),
        height: known.height.unwrap_or(height as f32),
    }
}
