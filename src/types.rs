use std::collections::HashMap;

/// 8-bit RGBA color. The default value is fully transparent black.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Fill paint. `present == false` means the shape is not filled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FillStyle {
    pub present: bool,
    pub color: Color,
}

/// Stroke paint.
///
/// A `width <= 0` leaves the backend's current stroke width untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeStyle {
    pub present: bool,
    pub color: Color,
    pub width: f32,
}

/// Resolved presentation attributes of a node
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    pub fill: FillStyle,
    pub stroke: StrokeStyle,
    /// Style entries with no dedicated field, kept verbatim
    pub unknown: HashMap<String, String>,
}

impl AttributeSet {
    /// Starting attributes for a child node: a copy of the parent's resolved
    /// fill and stroke. Unknown entries are not inherited.
    pub fn inherit(parent: &AttributeSet) -> Self {
        Self {
            fill: parent.fill,
            stroke: parent.stroke,
            unknown: HashMap::new(),
        }
    }
}

/// One command of a path's data.
///
/// The `absolute` flag records the case of the source command letter; the
/// coordinates themselves are stored exactly as written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo {
        absolute: bool,
        x: f32,
        y: f32,
    },
    LineTo {
        absolute: bool,
        x: f32,
        y: f32,
    },
    QuadTo {
        absolute: bool,
        cx: f32,
        cy: f32,
        x: f32,
        y: f32,
    },
    CubicTo {
        absolute: bool,
        c1x: f32,
        c1y: f32,
        c2x: f32,
        c2y: f32,
        x: f32,
        y: f32,
    },
    ArcTo {
        absolute: bool,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
    },
    ClosePath,
}

impl PathSegment {
    /// Whether this segment draws geometry (everything except moves and closes)
    pub fn is_drawing(&self) -> bool {
        !matches!(self, PathSegment::MoveTo { .. } | PathSegment::ClosePath)
    }
}

/// `<path>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub id: String,
    pub attributes: AttributeSet,
    pub segments: Vec<PathSegment>,
}

/// `<g>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    pub attributes: AttributeSet,
    /// Raw `transform` attribute. Recorded, never applied.
    pub transform: Option<String>,
    pub children: Vec<Node>,
}

/// Child of a group
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Path(Path),
    Group(Group),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Path(p) => &p.id,
            Node::Group(g) => &g.id,
        }
    }
}

/// Parsed document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub groups: Vec<Group>,
}

impl Document {
    /// Depth-first search for a group by id, top-level groups included
    pub fn group(&self, id: &str) -> Option<&Group> {
        fn search<'a>(group: &'a Group, id: &str) -> Option<&'a Group> {
            if group.id == id {
                return Some(group);
            }
            group.children.iter().find_map(|child| match child {
                Node::Group(g) => search(g, id),
                Node::Path(_) => None,
            })
        }

        self.groups.iter().find_map(|g| search(g, id))
    }

    /// Depth-first search for a path by id
    pub fn path(&self, id: &str) -> Option<&Path> {
        fn search<'a>(children: &'a [Node], id: &str) -> Option<&'a Path> {
            for child in children {
                match child {
                    Node::Path(p) if p.id == id => return Some(p),
                    Node::Path(_) => {}
                    Node::Group(g) => {
                        if let Some(found) = search(&g.children, id) {
                            return Some(found);
                        }
                    }
                }
            }
            None
        }

        self.groups.iter().find_map(|g| search(&g.children, id))
    }
}
