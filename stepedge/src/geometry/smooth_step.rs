//! Orthogonal step path with rounded corners between two anchors.
//!
//! Both anchors are first pushed out by `gap` along the side they sit on.
//! Opposite sides are joined through a split line (the horizontal center,
//! or `center_y`), every other combination through a single corner.
//! Interior corners are rounded with one quadratic segment each, whose
//! control point is the corner itself.

use crate::config::EdgeConfig;
use crate::model::{AnchorPair, PathDescription, PathSegment, Point, Position};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOptions {
    pub center_y: Option<f64>,
    pub border_radius: f64,
    pub gap: f64,
}

impl StepOptions {
    pub fn from_config(cfg: &EdgeConfig, center_y: f64) -> StepOptions {
        StepOptions { center_y: Some(center_y), border_radius: cfg.border_radius, gap: cfg.step_gap }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothStep {
    pub path: PathDescription,
    pub label: Point,
    /// Half the horizontal / vertical anchor distance.
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Clone, Copy, PartialEq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, p: Point) -> f64 {
        match self { Axis::X => p.x, Axis::Y => p.y }
    }
    fn set(self, p: &mut Point, v: f64) {
        match self { Axis::X => p.x = v, Axis::Y => p.y = v }
    }
    fn other(self) -> Axis {
        match self { Axis::X => Axis::Y, Axis::Y => Axis::X }
    }
}

fn gapped(p: Point, side: Position, gap: f64) -> Point {
    let d = side.direction();
    Point::new(p.x + d.x * gap, p.y + d.y * gap)
}

// Main travel direction, judged along the source side's axis.
fn travel_direction(source: Point, side: Position, target: Point) -> Point {
    if side.is_horizontal() {
        Point::new(if source.x < target.x { 1.0 } else { -1.0 }, 0.0)
    } else {
        Point::new(0.0, if source.y < target.y { 1.0 } else { -1.0 })
    }
}

/// Center of the anchors plus the half distances along each axis.
pub fn edge_center(source: Point, target: Point) -> (Point, f64, f64) {
    let off_x = (target.x - source.x).abs() / 2.0;
    let cx = if target.x < source.x { target.x + off_x } else { target.x - off_x };
    let off_y = (target.y - source.y).abs() / 2.0;
    let cy = if target.y < source.y { target.y + off_y } else { target.y - off_y };
    (Point::new(cx, cy), off_x, off_y)
}

fn step_points(anchors: &AnchorPair, opts: &StepOptions) -> (Vec<Point>, Point, f64, f64) {
    let source = anchors.source();
    let target = anchors.target();
    let (sp, tp) = (anchors.source_side, anchors.target_side);
    let sdir = sp.direction();
    let tdir = tp.direction();
    let sg = gapped(source, sp, opts.gap);
    let tg = gapped(target, tp, opts.gap);
    let dir = travel_direction(sg, sp, tg);
    let axis = if dir.x != 0.0 { Axis::X } else { Axis::Y };
    let curr = axis.get(dir);

    let (default_center, off_x, off_y) = edge_center(source, target);
    let mut s_off = Point::default();
    let mut t_off = Point::default();
    let mut points: Vec<Point>;
    let label: Point;

    if axis.get(sdir) * axis.get(tdir) == -1.0 {
        let cx = default_center.x;
        let cy = opts.center_y.unwrap_or(default_center.y);
        let vertical_split = vec![Point::new(cx, sg.y), Point::new(cx, tg.y)];
        let horizontal_split = vec![Point::new(sg.x, cy), Point::new(tg.x, cy)];
        let along_travel = axis.get(sdir) == curr;
        points = match (along_travel, axis) {
            (true, Axis::X) | (false, Axis::Y) => vertical_split,
            (true, Axis::Y) | (false, Axis::X) => horizontal_split,
        };
        label = Point::new(cx, cy);
    } else {
        // source_target takes x from the source and y from the target
        let source_target = vec![Point::new(sg.x, tg.y)];
        let target_source = vec![Point::new(tg.x, sg.y)];
        points = match axis {
            Axis::X if sdir.x == curr => target_source.clone(),
            Axis::X => source_target.clone(),
            Axis::Y if sdir.y == curr => source_target.clone(),
            Axis::Y => target_source.clone(),
        };

        if sp == tp {
            // Same sides closer than the gap would fold back over the gapped points.
            let diff = (axis.get(source) - axis.get(target)).abs();
            if diff <= opts.gap {
                let gap_offset = (opts.gap - 1.0).min(opts.gap - diff);
                if axis.get(sdir) == curr {
                    let sign = if axis.get(sg) > axis.get(source) { -1.0 } else { 1.0 };
                    axis.set(&mut s_off, sign * gap_offset);
                } else {
                    let sign = if axis.get(tg) > axis.get(target) { -1.0 } else { 1.0 };
                    axis.set(&mut t_off, sign * gap_offset);
                }
            }
        } else {
            let opp = axis.other();
            let same_dir = axis.get(sdir) == opp.get(tdir);
            let s_gt = opp.get(sg) > opp.get(tg);
            let s_lt = opp.get(sg) < opp.get(tg);
            let flip = if axis.get(sdir) == 1.0 {
                (!same_dir && s_gt) || (same_dir && s_lt)
            } else {
                (!same_dir && s_lt) || (same_dir && s_gt)
            };
            if flip {
                points = if axis == Axis::X { source_target } else { target_source };
            }
        }

        let sgp = Point::new(sg.x + s_off.x, sg.y + s_off.y);
        let tgp = Point::new(tg.x + t_off.x, tg.y + t_off.y);
        let p0 = points[0];
        let max_x = (sgp.x - p0.x).abs().max((tgp.x - p0.x).abs());
        let max_y = (sgp.y - p0.y).abs().max((tgp.y - p0.y).abs());
        // label sits on the longest leg
        label = if max_x >= max_y {
            Point::new((sgp.x + tgp.x) / 2.0, p0.y)
        } else {
            Point::new(p0.x, (sgp.y + tgp.y) / 2.0)
        };
    }

    let mut all = Vec::with_capacity(points.len() + 4);
    all.push(source);
    all.push(Point::new(sg.x + s_off.x, sg.y + s_off.y));
    all.append(&mut points);
    all.push(Point::new(tg.x + t_off.x, tg.y + t_off.y));
    all.push(target);
    (all, label, off_x, off_y)
}

fn push_bend(path: &mut PathDescription, a: Point, b: Point, c: Point, radius: f64) {
    let size = (a.distance(b) / 2.0).min(b.distance(c) / 2.0).min(radius);
    if (a.x == b.x && b.x == c.x) || (a.y == b.y && b.y == c.y) {
        path.push(PathSegment::Line { to: b });
        return;
    }
    if a.y == b.y {
        // horizontal into the corner
        let x_dir = if a.x < c.x { -1.0 } else { 1.0 };
        let y_dir = if a.y < c.y { 1.0 } else { -1.0 };
        path.push(PathSegment::Line { to: Point::new(b.x + size * x_dir, b.y) });
        path.push(PathSegment::Quad { ctrl: b, to: Point::new(b.x, b.y + size * y_dir) });
    } else {
        let x_dir = if a.x < c.x { 1.0 } else { -1.0 };
        let y_dir = if a.y < c.y { -1.0 } else { 1.0 };
        path.push(PathSegment::Line { to: Point::new(b.x, b.y + size * y_dir) });
        path.push(PathSegment::Quad { ctrl: b, to: Point::new(b.x + size * x_dir, b.y) });
    }
}

pub fn smooth_step_path(anchors: &AnchorPair, opts: &StepOptions) -> SmoothStep {
    let (points, label, offset_x, offset_y) = step_points(anchors, opts);
    let mut path = PathDescription::new();
    let last = points.len() - 1;
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            path.push(PathSegment::Move { to: p });
        } else if i == last {
            path.push(PathSegment::Line { to: p });
        } else {
            push_bend(&mut path, points[i - 1], p, points[i + 1], opts.border_radius);
        }
    }
    SmoothStep { path, label, offset_x, offset_y }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors(sx: f64, sy: f64, tx: f64, ty: f64) -> AnchorPair {
        AnchorPair::new(Point::new(sx, sy), Point::new(tx, ty), Position::Bottom, Position::Top)
    }

    fn opts(center_y: f64) -> StepOptions {
        StepOptions { center_y: Some(center_y), border_radius: 16.0, gap: 20.0 }
    }

    #[test]
    fn vertical_edge_has_no_corners() {
        let s = smooth_step_path(&anchors(0.0, 0.0, 0.0, 200.0), &opts(100.0));
        assert_eq!(s.label, Point::new(0.0, 100.0));
        assert!(s.path.quad_segments().is_empty());
        assert_eq!(s.path.segments[0], PathSegment::Move { to: Point::new(0.0, 0.0) });
        assert_eq!(s.path.segments.last(), Some(&PathSegment::Line { to: Point::new(0.0, 200.0) }));
    }

    #[test]
    fn offset_step_rounds_two_corners() {
        let s = smooth_step_path(&anchors(0.0, 0.0, 200.0, 200.0), &opts(90.0));
        let quads = s.path.quad_segments();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].0, Point::new(0.0, 90.0));
        assert_eq!(quads[0].1, Point::new(16.0, 90.0));
        assert_eq!(quads[1].0, Point::new(200.0, 90.0));
        assert_eq!(quads[1].1, Point::new(200.0, 106.0));
        assert_eq!(s.label, Point::new(100.0, 90.0));
        assert_eq!((s.offset_x, s.offset_y), (100.0, 100.0));
    }

    #[test]
    fn radius_shrinks_on_short_legs() {
        let s = smooth_step_path(&anchors(0.0, 0.0, 10.0, 200.0), &opts(100.0));
        let quads = s.path.quad_segments();
        assert_eq!(quads.len(), 2);
        // horizontal leg is 10 wide, so each bend is at most 5
        assert_eq!(quads[0].1, Point::new(5.0, 100.0));
    }

    #[test]
    fn coincident_anchors_stay_finite() {
        let s = smooth_step_path(&anchors(5.0, 5.0, 5.0, 5.0), &opts(5.0));
        assert!(s.label.is_finite());
        for seg in &s.path.segments {
            if let PathSegment::Line { to } | PathSegment::Move { to } = seg {
                assert!(to.is_finite());
            }
        }
    }

    #[test]
    fn mixed_sides_use_single_corner() {
        let a = AnchorPair::new(Point::new(0.0, 0.0), Point::new(200.0, 100.0), Position::Right, Position::Top);
        let s = smooth_step_path(&a, &opts(50.0));
        assert_eq!(s.path.quad_segments().len(), 1);
        assert_eq!(s.path.quad_segments()[0].0, Point::new(200.0, 0.0));
    }

    #[test]
    fn same_sides_close_together_get_gap_correction() {
        let a = AnchorPair::new(Point::new(0.0, 0.0), Point::new(10.0, 100.0), Position::Right, Position::Right);
        let s = smooth_step_path(&a, &opts(50.0));
        assert!(s.label.is_finite());
        assert!(!s.path.is_empty());
    }
}
