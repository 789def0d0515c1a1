use crate::error::{EdgeError, Result};
use serde::{Deserialize, Serialize};

/// How the drag overshoot guard measures a pointer jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OvershootMetric {
    /// `|candidate - prev|`
    #[default]
    Delta,
    /// `|candidate| - |prev|`, only growth away from the natural center counts.
    Magnitude,
}

/// Colours handed to the rendering surface. Injected instead of being read
/// from a global style sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Theme {
    pub line_color: String,
    pub primary_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme { line_color: "#b1b1b7".to_string(), primary_color: "#1677ff".to_string() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeConfig {
    /// Proximity threshold around both anchors (px).
    pub margin: f64,
    /// Largest offset change accepted from one pointer event before the
    /// overshoot guard snaps to an extreme.
    pub max_step: f64,
    /// Offset units removed per resting correction cycle.
    pub relax_step: f64,
    pub border_radius: f64,
    pub stroke_width: f64,
    pub hit_stroke_width: f64,
    pub dash: f64,
    /// Length of the straight leg leaving each anchor before the first bend.
    pub step_gap: f64,
    /// Number of rounded corners a draggable step path has.
    pub expected_curves: usize,
    pub overshoot_metric: OvershootMetric,
    pub theme: Theme,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        EdgeConfig {
            margin: 40.0,
            max_step: 20.0,
            relax_step: 2.0,
            border_radius: 16.0,
            stroke_width: 2.0,
            hit_stroke_width: 20.0,
            dash: 15.0,
            step_gap: 20.0,
            expected_curves: 2,
            overshoot_metric: OvershootMetric::Delta,
            theme: Theme::default(),
        }
    }
}

impl EdgeConfig {
    pub fn from_json(text: &str) -> Result<EdgeConfig> {
        let cfg: EdgeConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("margin", self.margin),
            ("maxStep", self.max_step),
            ("relaxStep", self.relax_step),
            ("borderRadius", self.border_radius),
            ("strokeWidth", self.stroke_width),
            ("hitStrokeWidth", self.hit_stroke_width),
            ("dash", self.dash),
            ("stepGap", self.step_gap),
        ];
        for (field, v) in fields {
            if !v.is_finite() {
                return Err(EdgeError::InvalidConfig { field, reason: "must be finite".into() });
            }
            if v < 0.0 {
                return Err(EdgeError::InvalidConfig { field, reason: format!("must be >= 0, got {}", v) });
            }
        }
        if self.relax_step == 0.0 {
            return Err(EdgeError::InvalidConfig { field: "relaxStep", reason: "must be > 0".into() });
        }
        if self.expected_curves == 0 {
            return Err(EdgeError::InvalidConfig { field: "expectedCurves", reason: "must be > 0".into() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EdgeConfig::from_json(r#"{"margin": 30, "theme": {"primaryColor": "red"}}"#).unwrap();
        assert_eq!(cfg.margin, 30.0);
        assert_eq!(cfg.max_step, 20.0);
        assert_eq!(cfg.theme.primary_color, "red");
        assert_eq!(cfg.theme.line_color, Theme::default().line_color);
    }

    #[test]
    fn rejects_negative_and_zero_step() {
        let err = EdgeConfig::from_json(r#"{"margin": -1}"#).unwrap_err();
        assert_eq!(err.code(), "invalid_config");
        let err = EdgeConfig::from_json(r#"{"relaxStep": 0}"#).unwrap_err();
        assert!(matches!(err, EdgeError::InvalidConfig { field: "relaxStep", .. }));
    }

    #[test]
    fn overshoot_metric_parses_lowercase() {
        let cfg = EdgeConfig::from_json(r#"{"overshootMetric": "magnitude"}"#).unwrap();
        assert_eq!(cfg.overshoot_metric, OvershootMetric::Magnitude);
        assert_eq!(EdgeConfig::from_json("{ nope").unwrap_err().code(), "invalid_json");
    }
}
