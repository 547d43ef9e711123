pub use crate::color::{parse_color, Color};
pub use crate::draw::{normalize, Align, DrawOpt, Primitive};
pub use crate::error::Error;
pub use crate::path::{parse_path, PathCmd};
pub use crate::style::{font_opts, paint_opts, resolve_style, Style};
pub use crate::transform::{matrix4, transform_list, transform_opts, Matrix4, TransformOp};
pub use crate::util::*;

pub use glam::{vec2, Vec2};
pub use roxmltree::Node;
