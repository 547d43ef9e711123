use std::iter::Peekable;
use std::vec::IntoIter;

use nom::number::complete::float;

use crate::prelude::*;

/// One drawing command of a path, with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    Begin,
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierTo(Vec2, Vec2, Vec2),
    ClosePath,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Op(char),
    Num(f32),
}

fn is_sep(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

fn snippet(s: &str) -> String {
    s.chars().take(12).collect()
}

fn tokenize(d: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut rest = d.trim_start_matches(is_sep);
    while let Some(c) = rest.chars().next() {
        match c {
            'M' | 'm' | 'L' | 'l' | 'V' | 'v' | 'H' | 'h' | 'Z' | 'z' | 'C' | 'c' => {
                tokens.push(Token::Op(c));
                rest = &rest[1..];
            }
            'A' | 'a' | 'Q' | 'q' | 'T' | 't' | 'S' | 's' => {
                return Err(Error::UnsupportedPathCommand(c));
            }
            _ => {
                let (tail, value) =
                    float::<_, ()>(rest).map_err(|_| Error::InvalidPathToken(snippet(rest)))?;
                // a number ends at a separator, an opcode letter or the end;
                // sign-adjacent runs like "10-5" are outside the grammar
                if let Some(next) = tail.chars().next() {
                    if !is_sep(next) && !next.is_ascii_alphabetic() {
                        return Err(Error::UnsupportedPathCommand(next));
                    }
                }
                tokens.push(Token::Num(value));
                rest = tail;
            }
        }
        rest = rest.trim_start_matches(is_sep);
    }
    Ok(tokens)
}

type Tokens = Peekable<IntoIter<Token>>;

fn number(tokens: &mut Tokens) -> Result<f32, Error> {
    match tokens.next() {
        Some(Token::Num(value)) => Ok(value),
        Some(Token::Op(c)) => Err(Error::InvalidPathToken(c.to_string())),
        None => Err(Error::InvalidPathToken("end of path data".into())),
    }
}

fn point(tokens: &mut Tokens) -> Result<Vec2, Error> {
    Ok(vec2(number(tokens)?, number(tokens)?))
}

/// Reduces a path-data string into absolute drawing commands.
///
/// The output always starts with [`PathCmd::Begin`]. Relative opcodes are
/// resolved against the current point while reducing; repeated operand
/// tuples re-read the active opcode per the SVG path grammar.
pub fn parse_path(d: &str) -> Result<Vec<PathCmd>, Error> {
    let mut tokens = tokenize(d)?.into_iter().peekable();
    let mut cmds = vec![PathCmd::Begin];
    let mut cur = Vec2::ZERO;
    let mut active: Option<char> = None;

    while let Some(&token) = tokens.peek() {
        match token {
            Token::Op(c) => {
                tokens.next();
                if c == 'Z' || c == 'z' {
                    cmds.push(PathCmd::ClosePath);
                    // resets to the origin, not the subpath start
                    cur = Vec2::ZERO;
                    active = None;
                } else {
                    active = Some(c);
                }
            }
            Token::Num(first) => {
                let c = active.ok_or_else(|| Error::InvalidPathToken(first.to_string()))?;
                match c {
                    'M' | 'm' => {
                        let p = point(&mut tokens)?;
                        cur = if c == 'm' { cur + p } else { p };
                        cmds.push(PathCmd::MoveTo(cur));
                        // further pairs after a move-to are implicit line-tos
                        active = Some(if c == 'm' { 'l' } else { 'L' });
                    }
                    'L' | 'l' => {
                        let p = point(&mut tokens)?;
                        cur = if c == 'l' { cur + p } else { p };
                        cmds.push(PathCmd::LineTo(cur));
                    }
                    'H' | 'h' => {
                        let x = number(&mut tokens)?;
                        cur = if c == 'h' {
                            vec2(cur.x + x, cur.y)
                        } else {
                            vec2(x, cur.y)
                        };
                        cmds.push(PathCmd::LineTo(cur));
                    }
                    'V' | 'v' => {
                        let y = number(&mut tokens)?;
                        cur = if c == 'v' {
                            vec2(cur.x, cur.y + y)
                        } else {
                            vec2(cur.x, y)
                        };
                        cmds.push(PathCmd::LineTo(cur));
                    }
                    'C' | 'c' => {
                        let mut c1 = point(&mut tokens)?;
                        let mut c2 = point(&mut tokens)?;
                        let mut p = point(&mut tokens)?;
                        if c == 'c' {
                            c1 += cur;
                            c2 += cur;
                            p += cur;
                        }
                        cmds.push(PathCmd::BezierTo(c1, c2, p));
                        cur = p;
                    }
                    _ => unreachable!(),
                }
            }
        }
    }
    Ok(cmds)
}

pub fn convert(node: &Node, inherited: &Style) -> Result<Primitive, Error> {
    let cmds = match node.attribute("d") {
        Some(d) => parse_path(d)?,
        None => Vec::new(),
    };
    let style = resolve_style(node, Some(inherited));
    let mut opts = paint_opts(&style)?;
    opts.extend(transform_opts(node)?);
    Ok(Primitive::Path {
        cmds,
        opts: normalize(opts),
    })
}

#[test]
fn test_implicit_lineto() {
    assert_eq!(
        parse_path("M 0,0 10,0 10,10").unwrap(),
        vec![
            PathCmd::Begin,
            PathCmd::MoveTo(vec2(0.0, 0.0)),
            PathCmd::LineTo(vec2(10.0, 0.0)),
            PathCmd::LineTo(vec2(10.0, 10.0)),
        ]
    );
}

#[test]
fn test_relative_accumulation() {
    assert_eq!(
        parse_path("m 5,5 h 10 v 10 z").unwrap(),
        vec![
            PathCmd::Begin,
            PathCmd::MoveTo(vec2(5.0, 5.0)),
            PathCmd::LineTo(vec2(15.0, 5.0)),
            PathCmd::LineTo(vec2(15.0, 15.0)),
            PathCmd::ClosePath,
        ]
    );
}

#[test]
fn test_close_path_resets_to_origin() {
    assert_eq!(
        parse_path("M 10,10 L 20,20 Z l 5,5").unwrap(),
        vec![
            PathCmd::Begin,
            PathCmd::MoveTo(vec2(10.0, 10.0)),
            PathCmd::LineTo(vec2(20.0, 20.0)),
            PathCmd::ClosePath,
            PathCmd::LineTo(vec2(5.0, 5.0)),
        ]
    );
}

#[test]
fn test_cubic_bezier() {
    assert_eq!(
        parse_path("M 0,0 C 1,1 2,2 3,3 c 1,0 2,0 3,0").unwrap(),
        vec![
            PathCmd::Begin,
            PathCmd::MoveTo(vec2(0.0, 0.0)),
            PathCmd::BezierTo(vec2(1.0, 1.0), vec2(2.0, 2.0), vec2(3.0, 3.0)),
            PathCmd::BezierTo(vec2(4.0, 3.0), vec2(5.0, 3.0), vec2(6.0, 3.0)),
        ]
    );
}

#[test]
fn test_unsupported_commands() {
    assert!(matches!(
        parse_path("M 0,0 A 5 5 0 0 1 10 10"),
        Err(Error::UnsupportedPathCommand('A'))
    ));
    assert!(matches!(
        parse_path("M 0,0 Q 5,5 10,0"),
        Err(Error::UnsupportedPathCommand('Q'))
    ));
    assert!(matches!(
        parse_path("M 10-5"),
        Err(Error::UnsupportedPathCommand('-'))
    ));
}

#[test]
fn test_invalid_tokens() {
    assert!(matches!(
        parse_path("M 0,0 %"),
        Err(Error::InvalidPathToken(_))
    ));
    // operands before any opcode
    assert!(matches!(parse_path("5 5"), Err(Error::InvalidPathToken(_))));
    // starved operand tuple
    assert!(matches!(parse_path("L 5"), Err(Error::InvalidPathToken(_))));
    // close-path takes no operands
    assert!(matches!(
        parse_path("M 0,0 Z 5,5"),
        Err(Error::InvalidPathToken(_))
    ));
}

#[test]
fn test_exponent_floats() {
    assert_eq!(
        parse_path("M 1e1,-2.5e-1").unwrap(),
        vec![PathCmd::Begin, PathCmd::MoveTo(vec2(10.0, -0.25))]
    );
}
