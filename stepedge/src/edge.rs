//! Composition root for one connector: anchors and offset in, geometry,
//! handle visibility and store commits out.
//!
//! Nothing here reacts on its own. The host calls `set_anchors`,
//! `sync_from_store` and `update` whenever its inputs change, and forwards
//! pointer events while a drag session is running.

use crate::algorithms::curvature::classify;
use crate::algorithms::drag::{DragController, PointerHost};
use crate::algorithms::resting::{needs_relax, relax};
use crate::config::EdgeConfig;
use crate::error::{EdgeError, Result};
use crate::geometry::smooth_step::{smooth_step_path, StepOptions};
use crate::model::{AnchorPair, PathDescription, Point};
use crate::render::{build_frame, FrameInput, RenderFrame};
use crate::store::{with_offset, DiagramStore};
use crate::svg::to_path_data;
use serde::Serialize;
use std::rc::Rc;

/// Geometry derived from the anchors and the current offset.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeVisualState {
    pub offset: f64,
    pub path: PathDescription,
    pub path_data: String,
    pub label: Point,
    /// Curvature classifier verdict for `path`.
    pub step_shaped: bool,
}

/// Result of one [`EdgeVisual::update`] cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub offset_changed: bool,
    pub committed: bool,
    /// Another cycle is needed to finish easing the offset back.
    pub relaxing: bool,
}

pub struct EdgeVisual {
    id: String,
    config: EdgeConfig,
    anchors: AnchorPair,
    marker_end: String,
    offset: f64,
    state: EdgeVisualState,
    drag: DragController,
    committed: Option<f64>,
    pending_commit: bool,
}

fn derive_state(anchors: &AnchorPair, offset: f64, cfg: &EdgeConfig) -> EdgeVisualState {
    let center_y = anchors.default_center_y() - offset;
    let step = smooth_step_path(anchors, &StepOptions::from_config(cfg, center_y));
    EdgeVisualState {
        offset,
        step_shaped: classify(&step.path, cfg),
        path_data: to_path_data(&step.path),
        path: step.path,
        label: step.label,
    }
}

impl EdgeVisual {
    pub fn new(
        id: impl Into<String>,
        anchors: AnchorPair,
        marker_end: impl Into<String>,
        config: EdgeConfig,
        host: Rc<dyn PointerHost>,
    ) -> Result<EdgeVisual> {
        config.validate()?;
        if !anchors.is_finite() {
            return Err(EdgeError::NonFinite("anchors"));
        }
        let state = derive_state(&anchors, 0.0, &config);
        Ok(EdgeVisual {
            id: id.into(),
            config,
            anchors,
            marker_end: marker_end.into(),
            offset: 0.0,
            state,
            drag: DragController::new(host),
            committed: None,
            pending_commit: false,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn anchors(&self) -> &AnchorPair {
        &self.anchors
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    pub fn state(&self) -> &EdgeVisualState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        self.state = derive_state(&self.anchors, offset, &self.config);
        true
    }

    /// Reads the persisted offset on mount, then runs the first update.
    pub fn mount(&mut self, store: &mut dyn DiagramStore) -> UpdateOutcome {
        self.sync_from_store(store);
        self.update(store)
    }

    /// Adopts the store's `positionY` for this edge. A missing record is not
    /// an error: the offset simply stays local.
    pub fn sync_from_store(&mut self, store: &dyn DiagramStore) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        let Some(record) = store.find_edge(&self.id) else {
            log::debug!("edge {}: no store record yet", self.id);
            return false;
        };
        if !record.position_y.is_finite() {
            log::warn!("edge {}: ignoring non-finite stored offset", self.id);
            return false;
        }
        let stored = record.position_y;
        self.committed = Some(stored);
        self.set_offset(stored)
    }

    pub fn set_config(&mut self, config: EdgeConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.state = derive_state(&self.anchors, self.offset, &self.config);
        Ok(())
    }

    pub fn set_marker_end(&mut self, marker_end: impl Into<String>) {
        self.marker_end = marker_end.into();
    }

    pub fn set_anchors(&mut self, anchors: AnchorPair) -> Result<bool> {
        if !anchors.is_finite() {
            return Err(EdgeError::NonFinite("anchors"));
        }
        if anchors == self.anchors {
            return Ok(false);
        }
        self.anchors = anchors;
        self.state = derive_state(&self.anchors, self.offset, &self.config);
        Ok(true)
    }

    /// One update cycle: a resting correction step (outside drags) and a
    /// commit of any settled offset change.
    pub fn update(&mut self, store: &mut dyn DiagramStore) -> UpdateOutcome {
        if self.drag.is_dragging() {
            return UpdateOutcome { offset_changed: false, committed: false, relaxing: false };
        }
        let next = relax(self.offset, &self.anchors, &self.config);
        let offset_changed = self.set_offset(next);
        let committed = self.commit(store);
        UpdateOutcome {
            offset_changed,
            committed,
            relaxing: needs_relax(self.offset, &self.anchors, &self.config),
        }
    }

    fn commit(&mut self, store: &mut dyn DiagramStore) -> bool {
        if self.drag.is_dragging() {
            return false;
        }
        if !self.pending_commit && self.committed == Some(self.offset) {
            return false;
        }
        match with_offset(store.edges(), &self.id, self.offset) {
            Some(edges) => {
                store.set_edges(edges);
                self.committed = Some(self.offset);
                self.pending_commit = false;
                log::debug!("edge {}: committed offset {}", self.id, self.offset);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, store: &dyn DiagramStore) -> bool {
        store.active_edge_id() == Some(self.id.as_str())
    }

    pub fn handle_visible(&self, store: &dyn DiagramStore) -> bool {
        self.state.step_shaped && self.is_active(store)
    }

    /// Click on the path body selects this edge.
    pub fn click_path(&self, store: &mut dyn DiagramStore) {
        store.set_active_edge(&self.id);
    }

    /// Pointer down on the handle. Ignored when the handle is not shown.
    pub fn pointer_down(&mut self, client_y: f64, store: &dyn DiagramStore) -> bool {
        if !self.handle_visible(store) {
            return false;
        }
        self.drag.pointer_down(client_y, self.offset)
    }

    /// Returns true when the offset (and with it the geometry) changed.
    pub fn pointer_move(&mut self, client_y: f64, zoom: f64) -> bool {
        match self.drag.pointer_move(client_y, zoom, self.offset, &self.anchors, &self.config) {
            Some(next) => self.set_offset(next),
            None => false,
        }
    }

    /// Ends the drag session and commits its result once.
    pub fn pointer_up(&mut self, store: &mut dyn DiagramStore) -> bool {
        if !self.drag.pointer_up() {
            return false;
        }
        self.pending_commit = true;
        self.commit(store)
    }

    /// Component teardown: an unfinished drag session is dropped together
    /// with its listeners and nothing is committed.
    pub fn teardown(&mut self) {
        if self.drag.pointer_up() {
            log::debug!("edge {}: torn down mid-drag", self.id);
        }
    }

    pub fn frame(&self, store: &dyn DiagramStore) -> RenderFrame {
        let active = self.is_active(store);
        build_frame(
            FrameInput {
                id: &self.id,
                d: &self.state.path_data,
                label: self.state.label,
                marker_end: &self.marker_end,
                active,
                show_handle: active && self.state.step_shaped,
            },
            &self.config,
        )
    }
}
