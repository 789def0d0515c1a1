use crate::config::{EdgeConfig, OvershootMetric};
use crate::geometry::tolerance::{safe_div, EPS_DENOM};
use crate::model::AnchorPair;
use std::fmt;
use std::rc::Rc;

/// Identifies one registration of the global pointer listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerToken(pub u64);

/// Owner of the global pointer-move / pointer-up listeners (the browser
/// window, a test double, ...).
pub trait PointerHost {
    fn attach(&self) -> ListenerToken;
    fn detach(&self, token: ListenerToken);
}

/// Scoped listener registration: the listeners stay attached exactly as
/// long as this guard lives.
pub struct PointerSubscription {
    host: Rc<dyn PointerHost>,
    token: Option<ListenerToken>,
}

impl PointerSubscription {
    pub fn acquire(host: Rc<dyn PointerHost>) -> PointerSubscription {
        let token = host.attach();
        PointerSubscription { host, token: Some(token) }
    }

    pub fn token(&self) -> Option<ListenerToken> {
        self.token
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            self.host.detach(token);
        }
    }
}

impl fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerSubscription").field("token", &self.token).finish()
    }
}

#[derive(Debug)]
pub struct DragSession {
    pub start_pointer_y: f64,
    pub start_offset: f64,
    _listeners: PointerSubscription,
}

#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Pointer units -> diagram units. Zero, negative or missing zoom counts as 1.
pub fn drag_scale(zoom: f64) -> f64 {
    if !zoom.is_finite() || zoom <= EPS_DENOM {
        log::warn!("drag: unusable zoom factor {}, using scale 1", zoom);
        return 1.0;
    }
    safe_div(1.0, zoom, 1.0)
}

/// Clamps a candidate offset against the margins around both anchors.
///
/// Pointer jumps larger than `max_step` snap to the extreme on the side
/// the candidate points to; smaller moves are accepted while the midpoint
/// stays strictly inside the margins, or when they lead back toward the
/// center from a boundary. Everything else keeps `prev`.
pub fn clamp_offset(prev: f64, candidate: f64, anchors: &AnchorPair, cfg: &EdgeConfig) -> f64 {
    if !candidate.is_finite() {
        return prev;
    }
    let (sy, ty, m) = (anchors.source_y, anchors.target_y, cfg.margin);
    let center = anchors.default_center_y();
    let translated = center - prev;
    let next = center - candidate;
    let jump = match cfg.overshoot_metric {
        OvershootMetric::Delta => (candidate - prev).abs(),
        OvershootMetric::Magnitude => candidate.abs() - prev.abs(),
    };

    if jump > cfg.max_step && candidate < 0.0 {
        log::trace!("drag: overshoot {} -> target extreme", candidate);
        return center - ty + m;
    }
    if jump > cfg.max_step && candidate > 0.0 {
        log::trace!("drag: overshoot {} -> source extreme", candidate);
        return center - sy - m;
    }
    if next > sy + m && next < ty - m {
        return candidate;
    }
    // moving toward the target
    if candidate < prev && sy < translated && translated < ty - m && next <= ty - m {
        return candidate;
    }
    // moving toward the source
    if candidate > prev && translated < ty && translated > sy + m && next >= sy + m {
        return candidate;
    }
    log::trace!("drag: rejected {} (prev {})", candidate, prev);
    prev
}

pub struct DragController {
    host: Rc<dyn PointerHost>,
    state: DragState,
}

impl DragController {
    pub fn new(host: Rc<dyn PointerHost>) -> DragController {
        DragController { host, state: DragState::Idle }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    /// Idle -> Dragging. Returns false (and changes nothing) when a session
    /// is already running or the pointer position is unusable.
    pub fn pointer_down(&mut self, client_y: f64, current_offset: f64) -> bool {
        if self.is_dragging() {
            return false;
        }
        if !client_y.is_finite() || !current_offset.is_finite() {
            log::warn!("drag: ignoring pointer down at non-finite position");
            return false;
        }
        let listeners = PointerSubscription::acquire(self.host.clone());
        log::debug!("drag: start at y={} offset={} ({:?})", client_y, current_offset, listeners.token());
        self.state = DragState::Dragging(DragSession {
            start_pointer_y: client_y,
            start_offset: current_offset,
            _listeners: listeners,
        });
        true
    }

    /// Offset for a pointer move, or `None` while idle.
    pub fn pointer_move(
        &self,
        client_y: f64,
        zoom: f64,
        prev: f64,
        anchors: &AnchorPair,
        cfg: &EdgeConfig,
    ) -> Option<f64> {
        let session = self.session()?;
        let candidate = drag_scale(zoom) * (session.start_pointer_y - client_y) + session.start_offset;
        Some(clamp_offset(prev, candidate, anchors, cfg))
    }

    /// Dragging -> Idle; the session and its listeners are dropped here.
    pub fn pointer_up(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("drag: stop (started at offset {})", session.start_offset);
                true
            }
            DragState::Idle => false,
        }
    }
}
