use nom::{
    bytes::complete::{take_while, take_while1},
    character::complete::{alpha1, char, multispace0},
    combinator::all_consuming,
    multi::{many0, separated_list},
    number::complete::float,
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::draw::DrawOpt;
use crate::error::Error;
use glam::{vec2, Vec2};
use roxmltree::Node;

type R<'i, T> = IResult<&'i str, T, ()>;

/// One operation of a `transform` attribute, in source order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    Translate(Vec2),
    Scale(Vec2),
    Rotate(f32),
    Matrix([f32; 6]),
}

/// Row-major 4×4 matrix as consumed by the rendering side.
pub type Matrix4 = [[f32; 4]; 4];

/// Expands `matrix(a,b,c,d,e,f)` coefficients into the 4×4 form.
pub fn matrix4(m: [f32; 6]) -> Matrix4 {
    let [a, b, c, d, e, f] = m;
    [
        [a, c, e, 0.0],
        [b, d, f, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
    ]
}

fn sep0(i: &str) -> R<&str> {
    take_while(|c: char| c == ',' || c.is_whitespace())(i)
}

fn sep1(i: &str) -> R<&str> {
    take_while1(|c: char| c == ',' || c.is_whitespace())(i)
}

fn func(i: &str) -> R<(&str, Vec<f32>)> {
    pair(
        alpha1,
        delimited(
            preceded(multispace0, char('(')),
            delimited(sep0, separated_list(sep1, float), sep0),
            char(')'),
        ),
    )(i)
}

fn func_list(i: &str) -> R<Vec<(&str, Vec<f32>)>> {
    all_consuming(terminated(many0(preceded(sep0, func)), sep0))(i)
}

fn op(name: &str, args: &[f32]) -> Option<TransformOp> {
    Some(match (name, args) {
        ("translate", &[x]) => TransformOp::Translate(vec2(x, 0.0)),
        ("translate", &[x, y]) => TransformOp::Translate(vec2(x, y)),
        ("scale", &[s]) => TransformOp::Scale(vec2(s, s)),
        ("scale", &[sx, sy]) => TransformOp::Scale(vec2(sx, sy)),
        ("rotate", &[angle]) => TransformOp::Rotate(angle),
        ("matrix", &[a, b, c, d, e, f]) => TransformOp::Matrix([a, b, c, d, e, f]),
        _ => return None,
    })
}

/// Parses a `transform` attribute into its ordered operation list.
///
/// Unknown function names and wrong arities are fatal for the document.
pub fn transform_list(value: &str) -> Result<Vec<TransformOp>, Error> {
    let (_, funcs) = func_list(value).map_err(|_| Error::MalformedTransform(value.into()))?;
    funcs
        .into_iter()
        .map(|(name, args)| {
            op(name, &args).ok_or_else(|| Error::MalformedTransform(value.into()))
        })
        .collect()
}

/// The node's transform operations as draw options (`Matrix` expands here).
pub fn transform_opts(node: &Node) -> Result<Vec<DrawOpt>, Error> {
    let ops = node
        .attribute("transform")
        .map(transform_list)
        .transpose()?
        .unwrap_or_default();
    Ok(ops.into_iter().map(DrawOpt::from).collect())
}

#[test]
fn test_transform_list() {
    assert_eq!(
        transform_list("translate(10, 20) rotate(45)").unwrap(),
        vec![
            TransformOp::Translate(vec2(10.0, 20.0)),
            TransformOp::Rotate(45.0)
        ]
    );
    assert_eq!(
        transform_list(" scale( 2 ) , scale(1,-1)").unwrap(),
        vec![
            TransformOp::Scale(vec2(2.0, 2.0)),
            TransformOp::Scale(vec2(1.0, -1.0))
        ]
    );
    assert_eq!(transform_list("").unwrap(), vec![]);
}

#[test]
fn test_matrix_expansion() {
    assert_eq!(
        transform_list("matrix(1,0,0,1,30,40)").unwrap(),
        vec![TransformOp::Matrix([1.0, 0.0, 0.0, 1.0, 30.0, 40.0])]
    );
    assert_eq!(
        matrix4([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        [
            [1.0, 3.0, 5.0, 0.0],
            [2.0, 4.0, 6.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
        ]
    );
}

#[test]
fn test_malformed_transform() {
    assert!(transform_list("skewX(30)").is_err());
    assert!(transform_list("rotate(10, 5, 5)").is_err());
    assert!(transform_list("translate(").is_err());
    assert!(transform_list("translate(1,2) garbage").is_err());
}
