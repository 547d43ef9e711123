use crate::error::Error;
use roxmltree::Node;

/// Splits a `style` attribute into `(property, value)` declarations.
/// Declarations without a colon or with an empty property name are dropped.
pub fn declarations(s: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    s.split(';').filter_map(|item| {
        let mut kv = item.splitn(2, ':');
        match (kv.next(), kv.next()) {
            (Some(key), Some(value)) if !key.trim().is_empty() => {
                Some((key.trim(), value.trim()))
            }
            _ => None,
        }
    })
}

/// Numeric attribute. Absent is `None`; present but unparsable is an error.
pub fn num_attr(node: &Node, name: &'static str) -> Result<Option<f32>, Error> {
    match node.attribute(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::InvalidAttributeValue {
                attribute: name,
                value: value.into(),
            }),
        None => Ok(None),
    }
}

/// Like [`num_attr`], but tolerates a `px` suffix (root `width`/`height`).
pub fn dimension(node: &Node, name: &'static str) -> Result<Option<f32>, Error> {
    match node.attribute(name) {
        Some(value) => {
            let digits = value.trim();
            let digits = digits.strip_suffix("px").unwrap_or(digits).trim();
            digits
                .parse()
                .map(Some)
                .map_err(|_| Error::InvalidAttributeValue {
                    attribute: name,
                    value: value.into(),
                })
        }
        None => Ok(None),
    }
}

/// `viewBox="min-x min-y width height"` — returns the width/height part.
pub fn view_box(value: &str) -> Result<(f32, f32), Error> {
    let invalid = || Error::InvalidAttributeValue {
        attribute: "viewBox",
        value: value.into(),
    };
    let mut parts = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>());
    let _min_x = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let _min_y = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let width = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    let height = parts.next().ok_or_else(invalid)?.map_err(|_| invalid())?;
    Ok((width, height))
}

/// Opacity value, clamped to `[0, 1]`.
pub fn opacity(value: &str, property: &'static str) -> Result<f32, Error> {
    let val: f32 = value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidAttributeValue {
            attribute: property,
            value: value.into(),
        })?;
    Ok(val.min(1.0).max(0.0))
}

#[test]
fn test_declarations() {
    let decls: Vec<_> = declarations("fill:#ad1c1c; fill-opacity: 0.71 ;;bogus").collect();
    assert_eq!(decls, vec![("fill", "#ad1c1c"), ("fill-opacity", "0.71")]);
}

#[test]
fn test_view_box() {
    assert_eq!(view_box("0 0 210 297").unwrap(), (210.0, 297.0));
    assert_eq!(view_box("0,0,16,16").unwrap(), (16.0, 16.0));
    assert!(view_box("0 0 210").is_err());
}

#[test]
fn test_opacity_clamps() {
    assert_eq!(opacity("0.71", "fill-opacity").unwrap(), 0.71);
    assert_eq!(opacity("1.5", "fill-opacity").unwrap(), 1.0);
    assert_eq!(opacity("-1", "fill-opacity").unwrap(), 0.0);
    assert!(opacity("solid", "fill-opacity").is_err());
}
