use crate::config::EdgeConfig;
use crate::model::Point;
use serde::Serialize;

/// One stroked path primitive; all three primitives of an edge share `d`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokePath {
    pub d: String,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<String>,
    /// Receives clicks (selects the edge).
    pub interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DragHandle {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub id: String,
    pub active: bool,
    pub line: StrokePath,
    pub highlight: StrokePath,
    pub hit_area: StrokePath,
    pub handle: Option<DragHandle>,
}

pub(crate) struct FrameInput<'a> {
    pub id: &'a str,
    pub d: &'a str,
    pub label: Point,
    pub marker_end: &'a str,
    pub active: bool,
    pub show_handle: bool,
}

pub(crate) fn build_frame(input: FrameInput<'_>, cfg: &EdgeConfig) -> RenderFrame {
    let marker = if input.marker_end.is_empty() { None } else { Some(input.marker_end.to_string()) };
    let line = StrokePath {
        d: input.d.to_string(),
        stroke: cfg.theme.line_color.clone(),
        stroke_width: cfg.stroke_width,
        dash: None,
        marker_end: marker.clone(),
        interactive: false,
    };
    let highlight = StrokePath {
        d: input.d.to_string(),
        stroke: if input.active { cfg.theme.primary_color.clone() } else { "none".to_string() },
        stroke_width: cfg.stroke_width,
        dash: Some(cfg.dash),
        marker_end: marker,
        interactive: false,
    };
    let hit_area = StrokePath {
        d: input.d.to_string(),
        stroke: "transparent".to_string(),
        stroke_width: cfg.hit_stroke_width,
        dash: None,
        marker_end: None,
        interactive: true,
    };
    RenderFrame {
        id: input.id.to_string(),
        active: input.active,
        line,
        highlight,
        hit_area,
        handle: input.show_handle.then_some(DragHandle { x: input.label.x, y: input.label.y }),
    }
}
