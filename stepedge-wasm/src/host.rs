use crate::Shared;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use stepedge::algorithms::drag::{ListenerToken, PointerHost};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;

struct Listeners {
    token: ListenerToken,
    on_move: MouseClosure,
    on_up: MouseClosure,
}

/// Registers `mousemove` / `mouseup` on the window for the duration of a
/// drag session and forwards them to the bound edge.
pub struct WindowPointerHost {
    target: RefCell<Weak<RefCell<Shared>>>,
    next: Cell<u64>,
    live: RefCell<Vec<Listeners>>,
    // Detached closures can still be on the JS stack (mouseup detaches
    // itself), so they are dropped on the next attach instead.
    retired: RefCell<Vec<Listeners>>,
}

impl Default for WindowPointerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowPointerHost {
    pub fn new() -> WindowPointerHost {
        WindowPointerHost {
            target: RefCell::new(Weak::new()),
            next: Cell::new(1),
            live: RefCell::new(Vec::new()),
            retired: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn bind(&self, shared: &Rc<RefCell<Shared>>) {
        *self.target.borrow_mut() = Rc::downgrade(shared);
    }

    /// Number of listener pairs currently attached.
    pub fn live_count(&self) -> usize {
        self.live.borrow().len()
    }
}

impl PointerHost for WindowPointerHost {
    fn attach(&self) -> ListenerToken {
        self.retired.borrow_mut().clear();
        let token = ListenerToken(self.next.get());
        self.next.set(token.0 + 1);

        let weak = self.target.borrow().clone();
        let on_move = MouseClosure::new(move |e: MouseEvent| {
            if let Some(shared) = weak.upgrade() {
                Shared::handle_move(&shared, e.client_y() as f64);
            }
        });
        let weak = self.target.borrow().clone();
        let on_up = MouseClosure::new(move |_e: MouseEvent| {
            if let Some(shared) = weak.upgrade() {
                Shared::handle_up(&shared);
            }
        });

        match web_sys::window() {
            Some(w) => {
                let moved = w.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
                let upped = w.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref());
                if moved.is_err() || upped.is_err() {
                    log::warn!("pointer host: failed to attach window listeners");
                }
            }
            None => log::warn!("pointer host: no window, listeners not attached"),
        }
        self.live.borrow_mut().push(Listeners { token, on_move, on_up });
        token
    }

    fn detach(&self, token: ListenerToken) {
        let removed = {
            let mut live = self.live.borrow_mut();
            match live.iter().position(|l| l.token == token) {
                Some(idx) => live.remove(idx),
                None => return,
            }
        };
        if let Some(w) = web_sys::window() {
            let _ = w.remove_event_listener_with_callback("mousemove", removed.on_move.as_ref().unchecked_ref());
            let _ = w.remove_event_listener_with_callback("mouseup", removed.on_up.as_ref().unchecked_ref());
        }
        self.retired.borrow_mut().push(removed);
    }
}
