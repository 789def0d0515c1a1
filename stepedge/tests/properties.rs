use proptest::prelude::*;
use std::rc::Rc;
use stepedge::algorithms::curvature::is_step_shaped;
use stepedge::algorithms::drag::{DragController, ListenerToken, PointerHost};
use stepedge::algorithms::resting::{needs_relax, relax};
use stepedge::geometry::smooth_step::{smooth_step_path, StepOptions};
use stepedge::{AnchorPair, EdgeConfig, PathDescription, PathSegment, Point, Position};

struct NullHost;

impl PointerHost for NullHost {
    fn attach(&self) -> ListenerToken {
        ListenerToken(0)
    }
    fn detach(&self, _token: ListenerToken) {}
}

fn side_strategy() -> impl Strategy<Value = Position> {
    prop_oneof![
        Just(Position::Left),
        Just(Position::Right),
        Just(Position::Top),
        Just(Position::Bottom),
    ]
}

#[derive(Clone, Debug)]
enum Op {
    Move { y: i16 },
    Zoom { z: u8 },
    Up,
    Down { y: i16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => any::<i16>().prop_map(|y| Op::Move { y }),
        1 => (1u8..=40u8).prop_map(|z| Op::Zoom { z }),
        1 => Just(Op::Up),
        1 => any::<i16>().prop_map(|y| Op::Down { y }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]

    #[test]
    fn path_generation_is_deterministic(
        sx in -1000i32..1000, sy in -1000i32..1000,
        tx in -1000i32..1000, ty in -1000i32..1000,
        ss in side_strategy(), ts in side_strategy(),
        offset in -300i32..300,
    ) {
        let a = AnchorPair::new(Point::new(sx as f64, sy as f64), Point::new(tx as f64, ty as f64), ss, ts);
        let opts = StepOptions::from_config(&EdgeConfig::default(), a.default_center_y() - offset as f64);
        let first = smooth_step_path(&a, &opts);
        let second = smooth_step_path(&a, &opts);
        prop_assert_eq!(&first, &second);
        prop_assert!(first.label.is_finite());
        let starts_with_move = matches!(first.path.segments.first(), Some(PathSegment::Move { .. }));
        prop_assert!(starts_with_move);
    }

    #[test]
    fn drag_keeps_midpoint_inside_margins(
        sy in -500i32..500, h in 100i32..1000,
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let cfg = EdgeConfig::default();
        let a = AnchorPair::new(Point::new(0.0, sy as f64), Point::new(300.0, (sy + h) as f64), Position::Bottom, Position::Top);
        let mut ctl = DragController::new(Rc::new(NullHost));
        let mut offset = 0.0;
        let mut zoom = 1.0;
        ctl.pointer_down(0.0, offset);
        for op in ops {
            match op {
                Op::Move { y } => {
                    if let Some(next) = ctl.pointer_move(y as f64, zoom, offset, &a, &cfg) {
                        offset = next;
                    }
                }
                Op::Zoom { z } => zoom = z as f64 / 10.0,
                Op::Up => { ctl.pointer_up(); }
                Op::Down { y } => { ctl.pointer_down(y as f64, offset); }
            }
            let mid = a.default_center_y() - offset;
            prop_assert!(offset.is_finite());
            prop_assert!(mid >= a.source_y + cfg.margin - 1e-6, "midpoint {} below source bound", mid);
            prop_assert!(mid <= a.target_y - cfg.margin + 1e-6, "midpoint {} past target bound", mid);
        }
    }

    #[test]
    fn resting_relaxation_converges_without_overshoot(
        sy in -500i32..500, h in 0i32..400, start in -400i32..400,
    ) {
        let cfg = EdgeConfig::default();
        let a = AnchorPair::new(Point::new(0.0, sy as f64), Point::new(50.0, (sy + h) as f64), Position::Bottom, Position::Top);
        let mut offset = start as f64;
        let sign = offset.signum();
        for _ in 0..1000 {
            if !needs_relax(offset, &a, &cfg) {
                break;
            }
            let next = relax(offset, &a, &cfg);
            prop_assert!(next.abs() < offset.abs());
            prop_assert!(next == 0.0 || next.signum() == sign);
            offset = next;
        }
        prop_assert!(!needs_relax(offset, &a, &cfg));
    }

    #[test]
    fn classifier_tracks_corner_separation(x0 in -500i32..500, dx in -200i32..200, extra in any::<bool>()) {
        let x1 = x0 + dx;
        let mut p = PathDescription::new();
        p.push(PathSegment::Move { to: Point::new(x0 as f64, 0.0) });
        p.push(PathSegment::Quad { ctrl: Point::new(x0 as f64, 50.0), to: Point::new(x0 as f64 + 5.0, 50.0) });
        p.push(PathSegment::Quad { ctrl: Point::new(x1 as f64, 50.0), to: Point::new(x1 as f64, 55.0) });
        if extra {
            p.push(PathSegment::Quad { ctrl: Point::new(x1 as f64, 90.0), to: Point::new(x1 as f64, 95.0) });
            prop_assert!(!is_step_shaped(&p, 2, 40.0));
        } else {
            prop_assert_eq!(is_step_shaped(&p, 2, 40.0), dx.abs() > 40);
        }
    }
}
