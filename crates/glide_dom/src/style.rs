//! Inline style handling and translation to taffy styles

use indexmap::IndexMap;
use taffy::style::{Dimension, Display, FlexDirection, LengthPercentageAuto, Position, Style};

/// Inline style declarations in insertion order
pub type InlineStyle = IndexMap<String, String>;

const LENGTH_PROPERTIES: &[&str] = &[
    "top",
    "left",
    "right",
    "bottom",
    "width",
    "height",
    "min-width",
    "min-height",
    "max-width",
    "max-height",
    "margin",
    "margin-top",
    "margin-left",
    "margin-right",
    "margin-bottom",
    "padding",
    "padding-top",
    "padding-left",
    "padding-right",
    "padding-bottom",
    "font-size",
    "border-width",
    "letter-spacing",
];

/// Whether a CSS property takes a length (and is written with a `px` unit)
pub fn is_length_property(property: &str) -> bool {
    LENGTH_PROPERTIES.contains(&property)
}

/// Parse a pixel value such as `"12px"`, `"-3.5px"` or a bare number
pub fn parse_px(value: &str) -> Option<f32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_dimension(value: &str) -> Dimension {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        if let Ok(p) = percent.trim().parse::<f32>() {
            return Dimension::Percent(p / 100.0);
        }
    }
    match parse_px(value) {
        Some(px) => Dimension::Length(px),
        None => Dimension::Auto,
    }
}

fn parse_inset(value: Option<&String>) -> LengthPercentageAuto {
    let Some(value) = value else {
        return LengthPercentageAuto::Auto;
    };
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        if let Ok(p) = percent.trim().parse::<f32>() {
            return LengthPercentageAuto::Percent(p / 100.0);
        }
    }
    match parse_px(value) {
        Some(px) => LengthPercentageAuto::Length(px),
        None => LengthPercentageAuto::Auto,
    }
}

fn parse_margin(value: Option<&String>) -> Option<LengthPercentageAuto> {
    value
        .and_then(|v| parse_px(v))
        .map(LengthPercentageAuto::Length)
}

/// Translate inline declarations into the taffy style used for layout
///
/// Elements flow as a flex column by default and never shrink, which gives
/// block-like stacking. Only layout-affecting properties are read; the rest
/// (`visibility`, `z-index`, `opacity`, ...) stay inline.
pub(crate) fn to_layout_style(inline: &InlineStyle) -> Style {
    let mut style = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        flex_shrink: 0.0,
        ..Style::default()
    };

    if inline.get("display").map(|d| d.trim()) == Some("none") {
        style.display = Display::None;
    }

    match inline.get("flex-direction").map(|d| d.trim()) {
        Some("row") => style.flex_direction = FlexDirection::Row,
        Some("row-reverse") => style.flex_direction = FlexDirection::RowReverse,
        Some("column-reverse") => style.flex_direction = FlexDirection::ColumnReverse,
        _ => {}
    }

    // `static` (the default) ignores insets entirely
    let positioned = match inline.get("position").map(|p| p.trim()) {
        Some("absolute") => {
            style.position = Position::Absolute;
            true
        }
        Some("relative") => true,
        _ => false,
    };
    if positioned {
        style.inset.top = parse_inset(inline.get("top"));
        style.inset.left = parse_inset(inline.get("left"));
        style.inset.right = parse_inset(inline.get("right"));
        style.inset.bottom = parse_inset(inline.get("bottom"));
    }

    if let Some(width) = inline.get("width") {
        style.size.width = parse_dimension(width);
    }
    if let Some(height) = inline.get("height") {
        style.size.height = parse_dimension(height);
    }

    if let Some(all) = parse_margin(inline.get("margin")) {
        style.margin.top = all;
        style.margin.left = all;
        style.margin.right = all;
        style.margin.bottom = all;
    }
    if let Some(m) = parse_margin(inline.get("margin-top")) {
        style.margin.top = m;
    }
    if let Some(m) = parse_margin(inline.get("margin-left")) {
        style.margin.left = m;
    }
    if let Some(m) = parse_margin(inline.get("margin-right")) {
        style.margin.right = m;
    }
    if let Some(m) = parse_margin(inline.get("margin-bottom")) {
        style.margin.bottom = m;
    }

    style
}
