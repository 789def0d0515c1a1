use crate::config::EdgeConfig;
use crate::model::PathDescription;
use crate::svg::parse_path_data;

/// Decides whether a path is a genuine step shape worth a vertical drag
/// handle: exactly `expected` rounded corners, each one more than `margin`
/// away horizontally from the first.
pub fn is_step_shaped(path: &PathDescription, expected: usize, margin: f64) -> bool {
    let quads = path.quad_segments();
    if quads.len() != expected {
        return false;
    }
    let Some(&(first_ctrl, _)) = quads.first() else {
        return false;
    };
    quads[1..].iter().all(|(ctrl, _)| (ctrl.x - first_ctrl.x).abs() > margin)
}

pub fn classify(path: &PathDescription, cfg: &EdgeConfig) -> bool {
    is_step_shaped(path, cfg.expected_curves, cfg.margin)
}

/// Same as [`classify`] for raw path data; unparsable data never gets a handle.
pub fn classify_path_data(d: &str, cfg: &EdgeConfig) -> bool {
    match parse_path_data(d) {
        Ok(path) => classify(&path, cfg),
        Err(e) => {
            log::warn!("curvature: ignoring unparsable path data: {}", e);
            false
        }
    }
}
