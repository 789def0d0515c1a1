use crate::interop::{new_obj, set_kv, to_js};
use crate::{error, EdgeVisual, Shared};
use js_sys::Function;
use std::cell::RefCell;
use std::rc::Rc;
use stepedge::{AnchorPair, DiagramStore, EdgeConfig, EdgeRecord};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Whether a path data string would get a drag handle under the default config.
#[wasm_bindgen]
pub fn classify_path(d: &str) -> bool {
    stepedge::algorithms::curvature::classify_path_data(d, &EdgeConfig::default())
}

fn call1(cb: Option<Function>, arg: &JsValue) {
    if let Some(cb) = cb {
        if let Err(e) = cb.call1(&JsValue::NULL, arg) {
            log::warn!("edge callback threw: {:?}", e);
        }
    }
}

fn call0(cb: Option<Function>) {
    if let Some(cb) = cb {
        if let Err(e) = cb.call0(&JsValue::NULL) {
            log::warn!("edge callback threw: {:?}", e);
        }
    }
}

impl Shared {
    fn committed_edges(&self) -> JsValue {
        to_js(self.store.edges())
    }

    pub(crate) fn handle_move(shared: &Rc<RefCell<Shared>>, client_y: f64) -> bool {
        let Ok(mut s) = shared.try_borrow_mut() else {
            return false;
        };
        let zoom = s.zoom;
        let changed = s.visual.pointer_move(client_y, zoom);
        let cb = if changed { s.on_change.clone() } else { None };
        drop(s);
        call0(cb);
        changed
    }

    pub(crate) fn handle_up(shared: &Rc<RefCell<Shared>>) {
        let Ok(mut guard) = shared.try_borrow_mut() else {
            return;
        };
        let s = &mut *guard;
        let committed = s.visual.pointer_up(&mut s.store);
        let commit = if committed { Some((s.on_commit.clone(), s.committed_edges())) } else { None };
        let change = s.on_change.clone();
        drop(guard);
        if let Some((cb, edges)) = commit {
            call1(cb, &edges);
        }
        call0(change);
    }
}

impl EdgeVisual {
    fn run_update(&self, mount: bool) -> JsValue {
        let mut guard = self.shared.borrow_mut();
        let s = &mut *guard;
        let outcome = if mount { s.visual.mount(&mut s.store) } else { s.visual.update(&mut s.store) };
        let commit = if outcome.committed { Some((s.on_commit.clone(), s.committed_edges())) } else { None };
        drop(guard);
        if let Some((cb, edges)) = commit {
            call1(cb, &edges);
        }
        to_js(&outcome)
    }
}

#[wasm_bindgen]
impl EdgeVisual {
    #[wasm_bindgen(constructor)]
    pub fn new(id: &str) -> Result<EdgeVisual, JsValue> {
        EdgeVisual::rs_new(id).map_err(|e| error::from_edge_error(&e))
    }

    pub fn id(&self) -> String {
        self.shared.borrow().visual.id().to_string()
    }

    // Configuration and inputs
    pub fn set_config_res(&self, json: &str) -> JsValue {
        let cfg = match EdgeConfig::from_json(json) {
            Ok(cfg) => cfg,
            Err(e) => return error::from_edge_error(&e),
        };
        match self.shared.borrow_mut().visual.set_config(cfg) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_edge_error(&e),
        }
    }
    pub fn set_anchors(&self, sx: f64, sy: f64, tx: f64, ty: f64, source_position: &str, target_position: &str) -> bool {
        let anchors = AnchorPair::from_hints(sx, sy, tx, ty, source_position, target_position);
        self.shared.borrow_mut().visual.set_anchors(anchors).unwrap_or(false)
    }
    pub fn set_anchors_res(&self, sx: f64, sy: f64, tx: f64, ty: f64, source_position: &str, target_position: &str) -> JsValue {
        for (name, v) in [("sourceX", sx), ("sourceY", sy), ("targetX", tx), ("targetY", ty)] {
            if !v.is_finite() {
                return error::non_finite(name);
            }
        }
        error::ok(JsValue::from_bool(self.set_anchors(sx, sy, tx, ty, source_position, target_position)))
    }
    pub fn set_marker_end(&self, marker_end: &str) {
        self.shared.borrow_mut().visual.set_marker_end(marker_end);
    }
    /// Current viewport zoom; unusable values fall back to 1 while dragging.
    pub fn set_zoom(&self, zoom: f64) {
        self.shared.borrow_mut().zoom = zoom;
    }

    // Store mirroring
    pub fn load_edges_res(&self, edges: JsValue) -> JsValue {
        let records: Vec<EdgeRecord> = match serde_wasm_bindgen::from_value(edges) {
            Ok(r) => r,
            Err(e) => return error::err("invalid_json", format!("{}", e), None),
        };
        let mut guard = self.shared.borrow_mut();
        let s = &mut *guard;
        s.store.load(records);
        let changed = s.visual.sync_from_store(&s.store);
        error::ok(JsValue::from_bool(changed))
    }
    pub fn edges(&self) -> JsValue {
        self.shared.borrow().committed_edges()
    }
    pub fn set_active_edge_id(&self, id: Option<String>) {
        let mut s = self.shared.borrow_mut();
        match id {
            Some(id) => s.store.set_active_edge(&id),
            None => s.store.clear_active(),
        }
    }

    // Update cycle
    pub fn mount(&self) -> JsValue {
        self.run_update(true)
    }
    pub fn update(&self) -> JsValue {
        self.run_update(false)
    }

    // Interaction
    pub fn click_path(&self) {
        let mut guard = self.shared.borrow_mut();
        let s = &mut *guard;
        s.visual.click_path(&mut s.store);
        let cb = s.on_select.clone();
        let id = JsValue::from_str(s.visual.id());
        drop(guard);
        call1(cb, &id);
    }
    /// Starts a drag from the handle and attaches window listeners for it.
    pub fn pointer_down(&self, client_y: f64) -> bool {
        let mut guard = self.shared.borrow_mut();
        let s = &mut *guard;
        s.visual.pointer_down(client_y, &s.store)
    }
    /// For hosts forwarding pointer events themselves.
    pub fn pointer_move(&self, client_y: f64) -> bool {
        Shared::handle_move(&self.shared, client_y)
    }
    pub fn pointer_move_res(&self, client_y: f64) -> JsValue {
        if !client_y.is_finite() {
            return error::non_finite("clientY");
        }
        if !self.is_dragging() {
            return error::no_drag();
        }
        error::ok(JsValue::from_bool(self.pointer_move(client_y)))
    }
    pub fn pointer_up(&self) -> bool {
        let was_dragging = self.is_dragging();
        Shared::handle_up(&self.shared);
        was_dragging && !self.is_dragging()
    }
    /// Drops an unfinished drag session and its window listeners.
    pub fn teardown(&self) {
        self.shared.borrow_mut().visual.teardown();
    }

    // Read side
    pub fn frame(&self) -> JsValue {
        let s = self.shared.borrow();
        to_js(&s.visual.frame(&s.store))
    }
    pub fn offset(&self) -> f64 {
        self.shared.borrow().visual.offset()
    }
    pub fn label(&self) -> JsValue {
        let s = self.shared.borrow();
        let label = s.visual.state().label;
        let obj = new_obj();
        set_kv(&obj, "x", &JsValue::from_f64(label.x));
        set_kv(&obj, "y", &JsValue::from_f64(label.y));
        obj.into()
    }
    pub fn path_data(&self) -> String {
        self.shared.borrow().visual.state().path_data.clone()
    }
    pub fn handle_visible(&self) -> bool {
        let s = self.shared.borrow();
        s.visual.handle_visible(&s.store)
    }
    pub fn is_active(&self) -> bool {
        let s = self.shared.borrow();
        s.visual.is_active(&s.store)
    }
    pub fn is_dragging(&self) -> bool {
        self.shared.borrow().visual.is_dragging()
    }
    pub fn listener_count(&self) -> u32 {
        self.host.live_count() as u32
    }

    // Callbacks
    pub fn set_on_change(&self, f: Option<Function>) {
        self.shared.borrow_mut().on_change = f;
    }
    /// Receives the full updated edge collection after each commit.
    pub fn set_on_commit(&self, f: Option<Function>) {
        self.shared.borrow_mut().on_commit = f;
    }
    pub fn set_on_select(&self, f: Option<Function>) {
        self.shared.borrow_mut().on_select = f;
    }
}
