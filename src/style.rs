use std::collections::HashMap;

use crate::color::parse_color;
use crate::draw::{Align, DrawOpt};
use crate::error::Error;
use crate::util::{declarations, opacity};
use roxmltree::Node;

/// Per-element resolved property table.
pub type Style = HashMap<String, String>;

const PRESENTATION_ATTRS: &[&str] = &[
    "fill",
    "stroke",
    "fill-rule",
    "font-size",
    "font-family",
    "font-weight",
    "text-anchor",
];

/// Merges the inherited style, the `style` attribute and the bare
/// presentation attributes into one map. Own declarations win over
/// inherited ones.
///
/// Bare presentation attributes overwrite same-named `style` declarations —
/// the reverse of the CSS cascade, kept for output compatibility.
pub fn resolve_style(node: &Node, inherited: Option<&Style>) -> Style {
    let mut style = inherited.cloned().unwrap_or_default();
    if let Some(css) = node.attribute("style") {
        for (key, value) in declarations(css) {
            style.insert(key.into(), value.into());
        }
    }
    for &name in PRESENTATION_ATTRS {
        if let Some(value) = node.attribute(name) {
            if !value.is_empty() {
                style.insert(name.into(), value.into());
            }
        }
    }
    style
}

/// Fill and stroke options of a resolved style map.
///
/// A `fill` option is emitted only when the map carries a `fill` key that
/// resolves to a color; a `stroke` option additionally needs a numeric
/// `stroke-width`. Anything else is silent absence.
pub fn paint_opts(style: &Style) -> Result<Vec<DrawOpt>, Error> {
    let mut opts = Vec::new();
    if let Some(color) = style.get("fill").and_then(|v| parse_color(v)) {
        let o = style
            .get("fill-opacity")
            .map(|v| opacity(v, "fill-opacity"))
            .transpose()?;
        opts.push(DrawOpt::Fill(color.with_opacity(o)));
    }
    let stroke = style.get("stroke").and_then(|v| parse_color(v));
    let width = style.get("stroke-width").and_then(|v| v.trim().parse().ok());
    if let (Some(color), Some(width)) = (stroke, width) {
        let o = style
            .get("stroke-opacity")
            .map(|v| opacity(v, "stroke-opacity"))
            .transpose()?;
        opts.push(DrawOpt::Stroke(width, color.with_opacity(o)));
    }
    Ok(opts)
}

/// Font options of a resolved style map (for text primitives).
pub fn font_opts(style: &Style) -> Result<Vec<DrawOpt>, Error> {
    let mut opts = Vec::new();
    if let Some(value) = style.get("font-size") {
        opts.push(DrawOpt::FontSize(font_size(value)?));
    }
    if let Some(value) = style.get("font-family") {
        opts.push(DrawOpt::Font(value.clone()));
    }
    if let Some(value) = style.get("text-anchor") {
        match align(value) {
            Some(a) => opts.push(DrawOpt::TextAlign(a)),
            None => debug!("unknown text-anchor {:?}", value),
        }
    }
    Ok(opts)
}

// only px sizes exist in this subset; everything else is a hard error
fn font_size(value: &str) -> Result<u32, Error> {
    let digits = value
        .trim()
        .strip_suffix("px")
        .ok_or_else(|| Error::InvalidUnit(value.into()))?;
    let size: f32 = digits
        .trim()
        .parse()
        .map_err(|_| Error::InvalidUnit(value.into()))?;
    Ok(size as u32)
}

fn align(value: &str) -> Option<Align> {
    match value {
        "start" => Some(Align::Left),
        "middle" => Some(Align::Center),
        "end" => Some(Align::Right),
        _ => None,
    }
}

#[cfg(test)]
fn resolve_str(text: &str, inherited: Option<&Style>) -> Style {
    let doc = roxmltree::Document::parse(text).unwrap();
    resolve_style(&doc.root_element(), inherited)
}

#[test]
fn test_style_attribute() {
    let style = resolve_str(r#"<rect style="fill:#ad1c1c; stroke-width: 2"/>"#, None);
    assert_eq!(style.get("fill").map(String::as_str), Some("#ad1c1c"));
    assert_eq!(style.get("stroke-width").map(String::as_str), Some("2"));
}

#[test]
fn test_presentation_attribute_wins() {
    let style = resolve_str(r#"<rect style="fill:black" fill="white"/>"#, None);
    assert_eq!(style.get("fill").map(String::as_str), Some("white"));
}

#[test]
fn test_empty_presentation_attribute_is_ignored() {
    let style = resolve_str(r#"<rect style="fill:black" fill=""/>"#, None);
    assert_eq!(style.get("fill").map(String::as_str), Some("black"));
}

#[test]
fn test_own_declarations_win_over_inherited() {
    let mut inherited = Style::new();
    inherited.insert("fill".into(), "black".into());
    inherited.insert("stroke".into(), "red".into());
    let style = resolve_str(r#"<path style="fill:white"/>"#, Some(&inherited));
    assert_eq!(style.get("fill").map(String::as_str), Some("white"));
    assert_eq!(style.get("stroke").map(String::as_str), Some("red"));
}

#[test]
fn test_fill_requires_key() {
    assert_eq!(paint_opts(&Style::new()).unwrap(), vec![]);

    let mut style = Style::new();
    style.insert("fill".into(), "none".into());
    assert_eq!(paint_opts(&style).unwrap(), vec![]);
}

#[test]
fn test_stroke_requires_width() {
    use crate::color::Color;

    let mut style = Style::new();
    style.insert("stroke".into(), "red".into());
    assert_eq!(paint_opts(&style).unwrap(), vec![]);

    style.insert("stroke-width".into(), "1.5".into());
    assert_eq!(
        paint_opts(&style).unwrap(),
        vec![DrawOpt::Stroke(1.5, Color::rgb(255, 0, 0))]
    );
}

#[test]
fn test_font_size_px_only() {
    let mut style = Style::new();
    style.insert("font-size".into(), "16.9px".into());
    assert_eq!(font_opts(&style).unwrap(), vec![DrawOpt::FontSize(16)]);

    style.insert("font-size".into(), "12pt".into());
    assert!(matches!(font_opts(&style), Err(Error::InvalidUnit(_))));

    style.insert("font-size".into(), "12".into());
    assert!(matches!(font_opts(&style), Err(Error::InvalidUnit(_))));
}
