//! Core types shared across the crate.
//!
//! Everything the renderer understands is built from these: colors, cell
//! attributes, the cell grid unit, clip rectangles, and the enums that style
//! resolution and layout translate between.

use bitflags::bitflags;

// =============================================================================
// Color
// =============================================================================

/// The sixteen standard terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BlackBright,
    RedBright,
    GreenBright,
    YellowBright,
    BlueBright,
    MagentaBright,
    CyanBright,
    WhiteBright,
}

impl NamedColor {
    /// SGR parameter for this color as a foreground (30-37, 90-97).
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::BlackBright => 90,
            Self::RedBright => 91,
            Self::GreenBright => 92,
            Self::YellowBright => 93,
            Self::BlueBright => 94,
            Self::MagentaBright => 95,
            Self::CyanBright => 96,
            Self::WhiteBright => 97,
        }
    }

    /// SGR parameter for this color as a background (40-47, 100-107).
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }

    /// Map a standard foreground SGR code back to a named color.
    pub const fn from_fg_code(code: u8) -> Option<Self> {
        Some(match code {
            30 => Self::Black,
            31 => Self::Red,
            32 => Self::Green,
            33 => Self::Yellow,
            34 => Self::Blue,
            35 => Self::Magenta,
            36 => Self::Cyan,
            37 => Self::White,
            90 => Self::BlackBright,
            91 => Self::RedBright,
            92 => Self::GreenBright,
            93 => Self::YellowBright,
            94 => Self::BlueBright,
            95 => Self::MagentaBright,
            96 => Self::CyanBright,
            97 => Self::WhiteBright,
            _ => return None,
        })
    }

    /// Approximate sRGB value, used for brightness decisions only.
    pub const fn approx_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (0, 0, 0),
            Self::Red => (205, 49, 49),
            Self::Green => (13, 188, 121),
            Self::Yellow => (229, 229, 16),
            Self::Blue => (36, 114, 200),
            Self::Magenta => (188, 63, 188),
            Self::Cyan => (17, 168, 205),
            Self::White => (229, 229, 229),
            Self::BlackBright => (102, 102, 102),
            Self::RedBright => (241, 76, 76),
            Self::GreenBright => (35, 209, 139),
            Self::YellowBright => (245, 245, 67),
            Self::BlueBright => (59, 142, 234),
            Self::MagentaBright => (214, 112, 214),
            Self::CyanBright => (41, 184, 219),
            Self::WhiteBright => (255, 255, 255),
        }
    }
}

/// A terminal color in one of the three escape-sequence domains.
///
/// The domains are deliberately kept distinct: a named `Red`, palette index
/// `1`, and truecolor `(205, 49, 49)` may render identically on some
/// terminals, but they are different wire representations and the diff
/// engine must treat them as unequal. Derived equality gives exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 standard colors.
    Named(NamedColor),
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Self = Self::Named(NamedColor::Black);
    pub const WHITE: Self = Self::Named(NamedColor::White);

    /// Parse a `#rrggbb` hex string into a truecolor value.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::Rgb(r, g, b))
    }

    /// Resolve to an approximate sRGB triple for brightness decisions.
    ///
    /// Indexed colors resolve through the xterm 256-color layout: 0-15 map
    /// onto the named palette, 16-231 the 6x6x6 cube, 232-255 grayscale.
    pub fn approx_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Named(named) => named.approx_rgb(),
            Self::Rgb(r, g, b) => (r, g, b),
            Self::Indexed(i) => match i {
                0 => NamedColor::Black.approx_rgb(),
                1 => NamedColor::Red.approx_rgb(),
                2 => NamedColor::Green.approx_rgb(),
                3 => NamedColor::Yellow.approx_rgb(),
                4 => NamedColor::Blue.approx_rgb(),
                5 => NamedColor::Magenta.approx_rgb(),
                6 => NamedColor::Cyan.approx_rgb(),
                7 => NamedColor::White.approx_rgb(),
                8 => NamedColor::BlackBright.approx_rgb(),
                9 => NamedColor::RedBright.approx_rgb(),
                10 => NamedColor::GreenBright.approx_rgb(),
                11 => NamedColor::YellowBright.approx_rgb(),
                12 => NamedColor::BlueBright.approx_rgb(),
                13 => NamedColor::MagentaBright.approx_rgb(),
                14 => NamedColor::CyanBright.approx_rgb(),
                15 => NamedColor::WhiteBright.approx_rgb(),
                16..=231 => {
                    let i = i - 16;
                    let step = |n: u8| if n == 0 { 0 } else { 55 + n * 40 };
                    (step(i / 36), step((i / 6) % 6), step(i % 6))
                }
                232..=255 => {
                    let v = 8 + (i - 232) * 10;
                    (v, v, v)
                }
            },
        }
    }

    /// Relative luminance in `[0, 1]` of the approximate sRGB value.
    pub fn luminance(self) -> f32 {
        let (r, g, b) = self.approx_rgb();
        (0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32) / 255.0
    }

    /// Whether text on this background wants a dark foreground.
    pub fn is_light(self) -> bool {
        self.luminance() > 0.5
    }
}

// =============================================================================
// Cell attributes
// =============================================================================

bitflags! {
    /// Per-cell text attributes.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// Glyph stored in the second column of a wide character.
///
/// Continuation cells participate in diffing (so overwrites are detected)
/// but are never emitted: the wide glyph before them already advanced the
/// terminal cursor over their column.
pub const CONTINUATION: char = '\0';

/// One terminal cell: the atomic unit the compositor fills and the diff
/// engine compares. Every cell of a framebuffer is always defined; the
/// default is a blank space with no colors and no attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    /// Foreground; `None` means the terminal's default.
    pub fg: Option<Color>,
    /// Background; `None` means the terminal's default.
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bg: None,
            attrs: Attr::empty(),
        }
    }
}

impl Cell {
    /// True if this is the continuation column of a wide glyph.
    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// An axis-aligned clipping rectangle in screen cells.
///
/// Signed coordinates: painting math can wander off the left/top edge and
/// clipping has to keep working there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ClipRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection of two rects; degenerate results come back with zero
    /// width/height rather than as an error.
    pub fn intersect(&self, other: &ClipRect) -> ClipRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = (self.x + self.width).min(other.x + other.width);
        let bottom = (self.y + self.height).min(other.y + other.height);
        ClipRect {
            x,
            y,
            width: (right - x).max(0),
            height: (bottom - y).max(0),
        }
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A size value that can be absolute (cells) or relative (percent of parent).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Size from content.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of the parent size (0-100).
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        Self::Cells(value)
    }
}

// =============================================================================
// Layout enums
// =============================================================================

/// Flex main-axis direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

/// Flex line wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

/// Main-axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Cross-axis alignment for children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    Baseline,
}

/// Per-item override of the parent's `AlignItems`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSelf {
    #[default]
    Auto,
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    Baseline,
}

/// Positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

// =============================================================================
// Text enums
// =============================================================================

/// Horizontal alignment of text inside its inner rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How text behaves when wider than the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrap {
    /// No reflow; width is the widest literal line.
    None,
    /// Greedy word wrap; an oversized word breaks character-by-character.
    #[default]
    Wrap,
    /// Hard clip, remainder dropped.
    Truncate,
    /// Clip to width-1 and append a single ellipsis glyph.
    Ellipsis,
}

// =============================================================================
// Borders
// =============================================================================

/// Border drawing style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    /// ─ │ ┌ ┐ └ ┘
    Single,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// - | + + + +
    Ascii,
}

/// Character set for one border style.
#[derive(Debug, Clone, Copy)]
pub struct BorderChars {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderStyle {
    /// The character set for this style, or `None` for borderless.
    pub const fn chars(self) -> Option<BorderChars> {
        let (horizontal, vertical, top_left, top_right, bottom_left, bottom_right) = match self {
            Self::None => return None,
            Self::Single => ('─', '│', '┌', '┐', '└', '┘'),
            Self::Double => ('═', '║', '╔', '╗', '╚', '╝'),
            Self::Rounded => ('─', '│', '╭', '╮', '╰', '╯'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        };
        Some(BorderChars {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
