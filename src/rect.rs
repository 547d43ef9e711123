use crate::prelude::*;

pub fn convert(node: &Node, inherited: &Style) -> Result<Primitive, Error> {
    let x = num_attr(node, "x")?;
    let y = num_attr(node, "y")?;
    let width = num_attr(node, "width")?.unwrap_or(0.0);
    let height = num_attr(node, "height")?.unwrap_or(0.0);
    let style = resolve_style(node, Some(inherited));

    let mut opts = Vec::new();
    if x.is_some() || y.is_some() {
        opts.push(DrawOpt::Translate(vec2(x.unwrap_or(0.0), y.unwrap_or(0.0))));
    }
    opts.extend(paint_opts(&style)?);
    opts.extend(transform_opts(node)?);

    Ok(Primitive::Rect {
        size: vec2(width, height),
        opts: normalize(opts),
    })
}
