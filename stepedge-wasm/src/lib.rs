use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod host;
mod interop;
mod logger;

pub use api::classify_path;
pub use host::WindowPointerHost;
pub use logger::init_logging;

/// State reachable both from the JS-facing methods and from the window
/// listeners of an active drag.
pub(crate) struct Shared {
    pub(crate) visual: stepedge::EdgeVisual,
    pub(crate) store: stepedge::MemoryStore,
    pub(crate) zoom: f64,
    pub(crate) on_change: Option<js_sys::Function>,
    pub(crate) on_commit: Option<js_sys::Function>,
    pub(crate) on_select: Option<js_sys::Function>,
}

#[wasm_bindgen]
pub struct EdgeVisual {
    pub(crate) shared: Rc<RefCell<Shared>>,
    pub(crate) host: Rc<WindowPointerHost>,
}

impl EdgeVisual {
    pub fn rs_new(id: &str) -> Result<EdgeVisual, stepedge::EdgeError> {
        let host = Rc::new(WindowPointerHost::new());
        let anchors = stepedge::AnchorPair::from_hints(0.0, 0.0, 0.0, 0.0, "", "");
        let visual = stepedge::EdgeVisual::new(id, anchors, "", stepedge::EdgeConfig::default(), host.clone())?;
        let shared = Rc::new(RefCell::new(Shared {
            visual,
            store: stepedge::MemoryStore::default(),
            zoom: 1.0,
            on_change: None,
            on_commit: None,
            on_select: None,
        }));
        host.bind(&shared);
        Ok(EdgeVisual { shared, host })
    }
}
