use crate::prelude::*;

pub fn convert(node: &Node, inherited: &Style) -> Result<Primitive, Error> {
    let style = resolve_style(node, Some(inherited));
    let scale = scale_of(node)?;

    let spans: Vec<Node> = node
        .children()
        .filter(|child| child.has_tag_name("tspan"))
        .collect();

    if spans.is_empty() {
        return span(node, &style, scale);
    }

    let mut prims = Vec::with_capacity(spans.len());
    for tspan in &spans {
        let span_style = resolve_style(tspan, Some(&style));
        prims.push(span(tspan, &span_style, scale)?);
    }
    if prims.len() == 1 {
        Ok(prims.remove(0))
    } else {
        Ok(Primitive::Group {
            children: prims,
            opts: Vec::new(),
        })
    }
}

// only scale() on a <text> affects tspan positions; other transform forms
// are not applied to text
fn scale_of(node: &Node) -> Result<Vec2, Error> {
    let ops = node
        .attribute("transform")
        .map(transform_list)
        .transpose()?
        .unwrap_or_default();
    Ok(ops.iter().fold(Vec2::ONE, |acc, op| match *op {
        TransformOp::Scale(factor) => acc * factor,
        _ => acc,
    }))
}

fn span(node: &Node, style: &Style, scale: Vec2) -> Result<Primitive, Error> {
    let x = num_attr(node, "x")?.unwrap_or(0.0);
    let y = num_attr(node, "y")?.unwrap_or(0.0);
    let content = node.text().unwrap_or("").trim().to_owned();

    let mut opts = vec![DrawOpt::Translate(vec2(x, y) * scale)];
    opts.extend(paint_opts(style)?);
    opts.extend(font_opts(style)?);

    Ok(Primitive::Text {
        content,
        opts: normalize(opts),
    })
}
