//! Converts an SVG document into a tree of abstract vector-drawing
//! primitives with resolved geometry, colors and transform options.
//!
//! The XML side is handled by `roxmltree`; rendering the resulting
//! [`Primitive`] tree is left to the consumer.

#[macro_use]
extern crate log;

use libflate::gzip::Decoder;
use roxmltree::NodeType;

mod color;
mod draw;
mod ellipse;
mod error;
mod g;
mod path;
mod prelude;
mod rect;
mod style;
mod text;
mod transform;
mod util;

pub use color::{parse_color, Color};
pub use draw::{normalize, Align, DrawOpt, Primitive};
pub use error::Error;
pub use glam::{vec2, Vec2};
pub use path::{parse_path, PathCmd};
pub use style::{resolve_style, Style};
pub use transform::{matrix4, transform_list, Matrix4, TransformOp};

use prelude::*;

/// A converted SVG document: canvas size plus the primitive tree.
///
/// `root` is always a [`Primitive::Group`] holding the top-level element
/// primitives in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: u32,
    pub height: u32,
    pub root: Primitive,
}

impl Document {
    pub fn from_str(text: &str) -> Result<Document, Error> {
        let doc = roxmltree::Document::parse(text)?;
        Document::parse(&doc)
    }

    /// Like [`Document::from_str`], but accepts gzip-compressed input.
    pub fn from_data(data: &[u8]) -> Result<Document, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            use std::io::Read;
            let mut decoder = Decoder::new(data).map_err(Error::Gzip)?;
            let mut decoded = Vec::new();
            decoder.read_to_end(&mut decoded).map_err(Error::Gzip)?;
            Document::from_str(std::str::from_utf8(&decoded)?)
        } else {
            Document::from_str(std::str::from_utf8(data)?)
        }
    }

    pub fn parse(doc: &roxmltree::Document) -> Result<Document, Error> {
        let root = doc.root_element();
        if !root.has_tag_name("svg") {
            return Err(Error::NotSvg);
        }

        // viewBox stands in when explicit dimensions are missing
        let (width, height) = match (dimension(&root, "width")?, dimension(&root, "height")?) {
            (Some(w), Some(h)) => (w, h),
            (w, h) => {
                let (vw, vh) = root
                    .attribute("viewBox")
                    .map(view_box)
                    .transpose()?
                    .unwrap_or((0.0, 0.0));
                (w.unwrap_or(vw), h.unwrap_or(vh))
            }
        };

        let children = parse_node_list(root.children(), &Style::new())?;
        Ok(Document {
            width: width as u32,
            height: height as u32,
            root: Primitive::Group {
                children,
                opts: Vec::new(),
            },
        })
    }
}

pub(crate) fn parse_node_list<'a, 'i: 'a>(
    nodes: impl Iterator<Item = Node<'a, 'i>>,
    inherited: &Style,
) -> Result<Vec<Primitive>, Error> {
    let mut items = Vec::new();
    for node in nodes {
        if node.node_type() == NodeType::Element {
            if let Some(item) = parse_node(&node, inherited)? {
                items.push(item);
            }
        }
    }
    Ok(items)
}

fn parse_node(node: &Node, inherited: &Style) -> Result<Option<Primitive>, Error> {
    Ok(match node.tag_name().name() {
        "title" | "desc" | "metadata" | "defs" | "style" => None,
        "rect" => Some(rect::convert(node, inherited)?),
        "circle" | "ellipse" => Some(ellipse::convert(node, inherited)?),
        "text" => Some(text::convert(node, inherited)?),
        "g" => Some(g::convert(node, inherited)?),
        "path" => Some(path::convert(node, inherited)?),
        tag => {
            debug!("skipping <{}>", tag);
            None
        }
    })
}

#[cfg(test)]
fn top_level(doc: &Document) -> &[Primitive] {
    match doc.root {
        Primitive::Group { ref children, .. } => children,
        _ => unreachable!(),
    }
}

#[test]
fn rect_geometry_roundtrip() {
    let doc = Document::from_str(
        r#"<svg width="200" height="100"><rect x="10" y="10" width="100" height="100"/></svg>"#,
    )
    .unwrap();
    assert_eq!(doc.width, 200);
    assert_eq!(doc.height, 100);
    assert_eq!(
        top_level(&doc),
        &[Primitive::Rect {
            size: vec2(100.0, 100.0),
            opts: vec![DrawOpt::Translate(vec2(10.0, 10.0))],
        }]
    );
}

#[test]
fn fill_opacity_composes() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1"><rect width="4" height="4" style="fill:#ad1c1c;fill-opacity:0.71"/></svg>"#,
    )
    .unwrap();
    assert_eq!(
        top_level(&doc),
        &[Primitive::Rect {
            size: vec2(4.0, 4.0),
            opts: vec![DrawOpt::Fill(Color::rgba(173, 28, 28, 181))],
        }]
    );
}

#[test]
fn translation_accumulates() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1"><rect x="10" width="2" height="2" transform="translate(5,5)"/></svg>"#,
    )
    .unwrap();
    assert_eq!(
        top_level(&doc),
        &[Primitive::Rect {
            size: vec2(2.0, 2.0),
            opts: vec![DrawOpt::Translate(vec2(15.0, 5.0))],
        }]
    );
}

#[test]
fn circle_and_ellipse() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1">
            <circle cx="5" cy="6" r="7" fill="red"/>
            <ellipse cx="1" cy="2" rx="3" ry="4"/>
        </svg>"#,
    )
    .unwrap();
    assert_eq!(
        top_level(&doc),
        &[
            Primitive::Circle {
                radius: 7.0,
                opts: vec![
                    DrawOpt::Fill(Color::rgb(255, 0, 0)),
                    DrawOpt::Translate(vec2(5.0, 6.0)),
                ],
            },
            Primitive::Ellipse {
                radius: vec2(3.0, 4.0),
                opts: vec![DrawOpt::Translate(vec2(1.0, 2.0))],
            },
        ]
    );
}

#[test]
fn group_cascades_style_to_children() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1"><g style="fill:red"><path d="M 0,0 L 1,1"/></g></svg>"#,
    )
    .unwrap();
    let group = &top_level(&doc)[0];
    assert_eq!(group.opts(), &[DrawOpt::Fill(Color::rgb(255, 0, 0))]);
    match group {
        Primitive::Group { children, .. } => {
            assert_eq!(children[0].opts(), &[DrawOpt::Fill(Color::rgb(255, 0, 0))]);
        }
        _ => panic!("expected group"),
    }
}

#[test]
fn text_scale_applies_to_tspan_positions() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1">
            <text transform="scale(2)" style="font-size:10px">
                <tspan x="5" y="10">a</tspan>
                <tspan x="5" y="20">b</tspan>
            </text>
        </svg>"#,
    )
    .unwrap();
    match &top_level(&doc)[0] {
        Primitive::Group { children, opts } => {
            assert!(opts.is_empty());
            assert_eq!(
                children[0],
                Primitive::Text {
                    content: "a".into(),
                    opts: vec![
                        DrawOpt::FontSize(10),
                        DrawOpt::Translate(vec2(10.0, 20.0)),
                    ],
                }
            );
            assert_eq!(
                children[1],
                Primitive::Text {
                    content: "b".into(),
                    opts: vec![
                        DrawOpt::FontSize(10),
                        DrawOpt::Translate(vec2(10.0, 40.0)),
                    ],
                }
            );
        }
        other => panic!("expected group, got {:?}", other),
    }
}

#[test]
fn text_without_tspans_is_a_single_primitive() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1"><text x="3" y="4" font-family="serif">hello</text></svg>"#,
    )
    .unwrap();
    assert_eq!(
        top_level(&doc),
        &[Primitive::Text {
            content: "hello".into(),
            opts: vec![
                DrawOpt::Font("serif".into()),
                DrawOpt::Translate(vec2(3.0, 4.0)),
            ],
        }]
    );
}

#[test]
fn unknown_elements_are_skipped() {
    let doc = Document::from_str(
        r#"<svg width="1" height="1"><defs><rect width="5" height="5"/></defs><filter/></svg>"#,
    )
    .unwrap();
    assert!(top_level(&doc).is_empty());
}

#[test]
fn malformed_transform_aborts_conversion() {
    let result = Document::from_str(
        r#"<svg width="1" height="1"><rect width="1" height="1" transform="skewX(30)"/></svg>"#,
    );
    assert!(matches!(result, Err(Error::MalformedTransform(_))));
}

#[test]
fn unsupported_path_command_aborts_conversion() {
    let result = Document::from_str(
        r#"<svg width="1" height="1"><path d="M 0,0 A 5 5 0 0 1 10 10"/></svg>"#,
    );
    assert!(matches!(result, Err(Error::UnsupportedPathCommand('A'))));
}

#[test]
fn reparse_is_deterministic() {
    let text = r#"<svg width="744.09448819" height="1052.3622047">
        <g style="fill:#ff0000;stroke:black;stroke-width:2" transform="translate(10,20) scale(2,3)">
            <rect x="1" y="2" width="3" height="4"/>
            <path d="m 5,5 c 1,1 2,2 3,3 z"/>
        </g>
    </svg>"#;
    let a = Document::from_str(text).unwrap();
    let b = Document::from_str(text).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.width, 744);
    assert_eq!(a.height, 1052);
}

#[test]
fn view_box_fallback_for_size() {
    let doc = Document::from_str(r#"<svg viewBox="0 0 210 297"/>"#).unwrap();
    assert_eq!((doc.width, doc.height), (210, 297));

    let doc = Document::from_str(r#"<svg width="16px" height="16px"/>"#).unwrap();
    assert_eq!((doc.width, doc.height), (16, 16));
}

#[test]
fn not_an_svg_document() {
    assert!(matches!(
        Document::from_str("<html/>"),
        Err(Error::NotSvg)
    ));
}

#[test]
fn gzip_input_roundtrip() {
    use std::io::Write;

    let text = r#"<svg width="8" height="8"><rect width="1" height="1"/></svg>"#;
    let mut encoder = libflate::gzip::Encoder::new(Vec::new()).unwrap();
    encoder.write_all(text.as_bytes()).unwrap();
    let compressed = encoder.finish().into_result().unwrap();

    assert_eq!(
        Document::from_data(&compressed).unwrap(),
        Document::from_str(text).unwrap()
    );
}
