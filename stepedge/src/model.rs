use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Side of a node an edge leaves from or arrives at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
    Top,
    Bottom,
}

impl Position {
    /// Parses a directional hint ("left", "Top", ...). Unknown hints yield `None`.
    pub fn parse(hint: &str) -> Option<Position> {
        match hint.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Position::Left),
            "right" => Some(Position::Right),
            "top" => Some(Position::Top),
            "bottom" => Some(Position::Bottom),
            _ => None,
        }
    }

    /// Unit direction pointing away from the node on this side.
    pub fn direction(self) -> Point {
        match self {
            Position::Left => Point { x: -1.0, y: 0.0 },
            Position::Right => Point { x: 1.0, y: 0.0 },
            Position::Top => Point { x: 0.0, y: -1.0 },
            Position::Bottom => Point { x: 0.0, y: 1.0 },
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Position::Left | Position::Right)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The two endpoints of a connector as handed over by the layout engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorPair {
    pub source_x: f64,
    pub source_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub source_side: Position,
    pub target_side: Position,
}

impl AnchorPair {
    pub fn new(source: Point, target: Point, source_side: Position, target_side: Position) -> Self {
        AnchorPair {
            source_x: source.x,
            source_y: source.y,
            target_x: target.x,
            target_y: target.y,
            source_side,
            target_side,
        }
    }

    /// Builds anchors from raw render props; unknown hints fall back to bottom -> top.
    pub fn from_hints(sx: f64, sy: f64, tx: f64, ty: f64, source_hint: &str, target_hint: &str) -> Self {
        AnchorPair {
            source_x: sx,
            source_y: sy,
            target_x: tx,
            target_y: ty,
            source_side: Position::parse(source_hint).unwrap_or(Position::Bottom),
            target_side: Position::parse(target_hint).unwrap_or(Position::Top),
        }
    }

    pub fn source(&self) -> Point {
        Point::new(self.source_x, self.source_y)
    }

    pub fn target(&self) -> Point {
        Point::new(self.target_x, self.target_y)
    }

    /// Natural vertical midpoint between the anchors (offset zero).
    pub fn default_center_y(&self) -> f64 {
        (self.source_y + self.target_y) / 2.0
    }

    pub fn is_finite(&self) -> bool {
        self.source().is_finite() && self.target().is_finite()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum PathSegment {
    #[serde(rename = "M")]
    Move { to: Point },
    #[serde(rename = "L")]
    Line { to: Point },
    #[serde(rename = "Q")]
    Quad { ctrl: Point, to: Point },
    #[serde(rename = "C")]
    Cubic { c1: Point, c2: Point, to: Point },
    #[serde(rename = "Z")]
    Close,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct PathDescription {
    pub segments: Vec<PathSegment>,
}

impl PathDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seg: PathSegment) {
        self.segments.push(seg);
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Control point and end point of every quadratic segment, in path order.
    pub fn quad_segments(&self) -> Vec<(Point, Point)> {
        self.segments
            .iter()
            .filter_map(|s| match *s {
                PathSegment::Quad { ctrl, to } => Some((ctrl, to)),
                _ => None,
            })
            .collect()
    }
}

/// One edge record of the external diagram store. Only `positionY` belongs
/// to this crate; every other field is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub id: String,
    #[serde(rename = "positionY", default)]
    pub position_y: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeRecord {
    pub fn new(id: impl Into<String>, position_y: f64) -> Self {
        EdgeRecord { id: id.into(), position_y, extra: Map::new() }
    }
}
