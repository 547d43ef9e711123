use crate::prelude::*;

// serves both <circle> and <ellipse>
pub fn convert(node: &Node, inherited: &Style) -> Result<Primitive, Error> {
    let cx = num_attr(node, "cx")?;
    let cy = num_attr(node, "cy")?;
    let style = resolve_style(node, Some(inherited));

    let mut opts = Vec::new();
    if cx.is_some() || cy.is_some() {
        opts.push(DrawOpt::Translate(vec2(
            cx.unwrap_or(0.0),
            cy.unwrap_or(0.0),
        )));
    }
    opts.extend(paint_opts(&style)?);
    opts.extend(transform_opts(node)?);
    let opts = normalize(opts);

    Ok(match node.tag_name().name() {
        "circle" => {
            let radius = num_attr(node, "r")?.unwrap_or(0.0);
            Primitive::Circle { radius, opts }
        }
        "ellipse" => {
            let rx = num_attr(node, "rx")?.unwrap_or(0.0);
            let ry = num_attr(node, "ry")?.unwrap_or(0.0);
            Primitive::Ellipse {
                radius: vec2(rx, ry),
                opts,
            }
        }
        _ => unreachable!(),
    })
}
