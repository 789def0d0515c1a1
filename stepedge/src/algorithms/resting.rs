use crate::config::EdgeConfig;
use crate::geometry::tolerance::step_toward_zero;
use crate::model::AnchorPair;

/// True when the midpoint implied by `offset` sits within the margin of
/// either anchor.
pub fn needs_relax(offset: f64, anchors: &AnchorPair, cfg: &EdgeConfig) -> bool {
    if offset == 0.0 {
        return false;
    }
    let mid = anchors.default_center_y() - offset;
    mid - anchors.source_y < cfg.margin || mid - anchors.target_y > -cfg.margin
}

/// One relaxation cycle: eases the offset toward zero by `relax_step`
/// while the midpoint crowds an anchor. Never crosses zero.
pub fn relax(offset: f64, anchors: &AnchorPair, cfg: &EdgeConfig) -> f64 {
    if !offset.is_finite() {
        return 0.0;
    }
    if !needs_relax(offset, anchors, cfg) {
        return offset;
    }
    let next = step_toward_zero(offset, cfg.relax_step);
    log::trace!("resting: offset {} -> {}", offset, next);
    next
}
