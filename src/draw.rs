use itertools::Itertools;

use crate::color::Color;
use crate::path::PathCmd;
use crate::transform::{matrix4, Matrix4, TransformOp};
use glam::Vec2;

/// Horizontal text alignment, from `text-anchor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A resolved drawing option attached to a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOpt {
    Fill(Color),
    Stroke(f32, Color),
    Font(String),
    FontSize(u32),
    TextAlign(Align),
    Translate(Vec2),
    Scale(Vec2),
    Rotate(f32),
    Matrix(Matrix4),
}

impl DrawOpt {
    /// Stable key used for option-list ordering and merging.
    pub fn key(&self) -> &'static str {
        match *self {
            DrawOpt::Fill(_) => "fill",
            DrawOpt::Stroke(..) => "stroke",
            DrawOpt::Font(_) => "font",
            DrawOpt::FontSize(_) => "font_size",
            DrawOpt::TextAlign(_) => "text_align",
            DrawOpt::Translate(_) => "t",
            DrawOpt::Scale(_) => "scale",
            DrawOpt::Rotate(_) => "rotate",
            DrawOpt::Matrix(_) => "matrix",
        }
    }
}

impl From<TransformOp> for DrawOpt {
    fn from(op: TransformOp) -> DrawOpt {
        match op {
            TransformOp::Translate(offset) => DrawOpt::Translate(offset),
            TransformOp::Scale(factor) => DrawOpt::Scale(factor),
            TransformOp::Rotate(angle) => DrawOpt::Rotate(angle),
            TransformOp::Matrix(m) => DrawOpt::Matrix(matrix4(m)),
        }
    }
}

/// Canonicalizes an option list: sorted by key, translations summed.
///
/// Multiple `t` entries (element position plus `translate(..)` transforms)
/// add component-wise. Every other key is assumed unique by construction.
pub fn normalize(mut opts: Vec<DrawOpt>) -> Vec<DrawOpt> {
    opts.sort_by(|a, b| a.key().cmp(b.key()));
    opts.into_iter()
        .coalesce(|a, b| match (a, b) {
            (DrawOpt::Translate(p), DrawOpt::Translate(q)) => Ok(DrawOpt::Translate(p + q)),
            (a, b) => Err((a, b)),
        })
        .collect()
}

/// One node of the drawing-instruction tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { size: Vec2, opts: Vec<DrawOpt> },
    Circle { radius: f32, opts: Vec<DrawOpt> },
    Ellipse { radius: Vec2, opts: Vec<DrawOpt> },
    Text { content: String, opts: Vec<DrawOpt> },
    Path { cmds: Vec<PathCmd>, opts: Vec<DrawOpt> },
    Group { children: Vec<Primitive>, opts: Vec<DrawOpt> },
}

impl Primitive {
    pub fn opts(&self) -> &[DrawOpt] {
        match *self {
            Primitive::Rect { ref opts, .. }
            | Primitive::Circle { ref opts, .. }
            | Primitive::Ellipse { ref opts, .. }
            | Primitive::Text { ref opts, .. }
            | Primitive::Path { ref opts, .. }
            | Primitive::Group { ref opts, .. } => opts,
        }
    }
}

#[test]
fn test_normalize_sums_translations() {
    use glam::vec2;
    let opts = normalize(vec![
        DrawOpt::Translate(vec2(10.0, 0.0)),
        DrawOpt::Fill(Color::rgb(0, 0, 0)),
        DrawOpt::Translate(vec2(5.0, 5.0)),
    ]);
    assert_eq!(
        opts,
        vec![
            DrawOpt::Fill(Color::rgb(0, 0, 0)),
            DrawOpt::Translate(vec2(15.0, 5.0)),
        ]
    );
}

#[test]
fn test_normalize_is_idempotent() {
    use glam::vec2;
    let opts = normalize(vec![
        DrawOpt::Rotate(45.0),
        DrawOpt::Translate(vec2(1.0, 2.0)),
        DrawOpt::Fill(Color::rgb(1, 2, 3)),
    ]);
    assert_eq!(normalize(opts.clone()), opts);
}

#[test]
fn test_normalize_sorts_by_key() {
    use glam::vec2;
    let opts = normalize(vec![
        DrawOpt::Translate(vec2(1.0, 1.0)),
        DrawOpt::Stroke(2.0, Color::rgb(0, 0, 0)),
        DrawOpt::Fill(Color::rgb(0, 0, 0)),
    ]);
    let keys: Vec<_> = opts.iter().map(DrawOpt::key).collect();
    assert_eq!(keys, vec!["fill", "stroke", "t"]);
}
