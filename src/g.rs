use crate::parse_node_list;
use crate::prelude::*;

pub fn convert(node: &Node, inherited: &Style) -> Result<Primitive, Error> {
    let style = resolve_style(node, Some(inherited));
    // children cascade from the group's resolved style; the group's own
    // options stay on the group node rather than being baked into them
    let children = parse_node_list(node.children(), &style)?;

    let mut opts = paint_opts(&style)?;
    opts.extend(transform_opts(node)?);

    Ok(Primitive::Group {
        children,
        opts: normalize(opts),
    })
}
