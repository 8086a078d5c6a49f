//! FILENAME: core/cellset-engine/src/style.rs
//! PURPOSE: Decodes cell style properties into one CSS declaration string.
//! CONTEXT: Colors come either as a packed integer or as an engine keyword.
//! Font flags are a bitmask (bold, italic, underline, strikethrough).
//! The declarations are collected as tagged fragments in a fixed order and
//! rendered once.

use crate::definition::{CellColor, CellProperties};

/// Keyword the engine sends (quotes included) for a transparent color.
const QUOTED_TRANSPARENT: &str = "\"transparent\"";

// Font flag bits
pub const FONT_FLAG_BOLD: u32 = 1;
pub const FONT_FLAG_ITALIC: u32 = 2;
pub const FONT_FLAG_UNDERLINE: u32 = 4;
pub const FONT_FLAG_STRIKEOUT: u32 = 8;

/// One CSS declaration derived from the cell properties.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleFragment {
    BackgroundColor(String),
    Bold,
    Italic,
    TextDecoration(Vec<&'static str>),
    FontFamily(String),
    FontSize(f64),
    Color(String),
}

impl StyleFragment {
    pub fn to_css(&self) -> String {
        match self {
            StyleFragment::BackgroundColor(color) => format!("background-color: {}", color),
            StyleFragment::Bold => "font-weight: bold".to_string(),
            StyleFragment::Italic => "font-style: italic".to_string(),
            StyleFragment::TextDecoration(words) => format!("text-decoration: {}", words.join(" ")),
            StyleFragment::FontFamily(name) => format!("font-family: {}", name),
            StyleFragment::FontSize(size) => format!("font-size: {}px", size),
            StyleFragment::Color(color) => format!("color: {}", color),
        }
    }
}

/// Converts a cell color into a CSS value.
///
/// Packed colors hold red in the lowest byte, then green, then blue.
pub fn color_to_css(color: &CellColor) -> String {
    match color {
        CellColor::Named(name) if name == QUOTED_TRANSPARENT => "transparent".to_string(),
        CellColor::Named(name) => name.clone(),
        CellColor::Packed(packed) => {
            let (rest, red) = (packed.div_euclid(256), packed.rem_euclid(256));
            let (rest, green) = (rest.div_euclid(256), rest.rem_euclid(256));
            let blue = rest.rem_euclid(256);
            format!("rgb({}, {}, {})", red, green, blue)
        }
    }
}

/// Expands a font flag bitmask into its fragments.
pub fn font_flag_fragments(flags: u32) -> Vec<StyleFragment> {
    let mut fragments = Vec::new();
    if flags & FONT_FLAG_BOLD != 0 {
        fragments.push(StyleFragment::Bold);
    }
    if flags & FONT_FLAG_ITALIC != 0 {
        fragments.push(StyleFragment::Italic);
    }

    let mut decorations = Vec::new();
    if flags & FONT_FLAG_UNDERLINE != 0 {
        decorations.push("underline");
    }
    if flags & FONT_FLAG_STRIKEOUT != 0 {
        decorations.push("line-through");
    }
    if !decorations.is_empty() {
        fragments.push(StyleFragment::TextDecoration(decorations));
    }

    fragments
}

/// Collects the fragments of a property map in rendering order.
pub fn style_fragments(properties: &CellProperties) -> Vec<StyleFragment> {
    let mut fragments = Vec::new();

    if let Some(color) = &properties.back_color {
        fragments.push(StyleFragment::BackgroundColor(color_to_css(color)));
    }
    if let Some(flags) = properties.font_flags {
        fragments.extend(font_flag_fragments(flags));
    }
    if let Some(name) = &properties.font_name {
        fragments.push(StyleFragment::FontFamily(name.clone()));
    }
    if let Some(size) = properties.font_size {
        fragments.push(StyleFragment::FontSize(size));
    }
    if let Some(color) = &properties.fore_color {
        fragments.push(StyleFragment::Color(color_to_css(color)));
    }

    fragments
}

/// Renders a property map as a `; `-separated CSS declaration list.
/// A cell without properties renders as an empty string.
pub fn properties_to_css(properties: Option<&CellProperties>) -> String {
    let Some(properties) = properties else {
        return String::new();
    };
    style_fragments(properties)
        .iter()
        .map(StyleFragment::to_css)
        .collect::<Vec<_>>()
        .join("; ")
}
