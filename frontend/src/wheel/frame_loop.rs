use shared::FrameScheduler;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// `requestAnimationFrame` scheduler. Clones share the same callback slot, so
/// one copy can live inside the controller while another installs the
/// callback that drives it.
#[derive(Clone, Default)]
pub struct RafScheduler {
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    pub fn install(&self, mut on_frame: impl FnMut() + 'static) {
        let pending = self.pending.clone();
        *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending.set(None);
            on_frame();
        }) as Box<dyn FnMut()>));
    }

    /// Cancels an outstanding request and drops the callback.
    pub fn cancel(&self) {
        if let (Some(id), Some(window)) = (self.pending.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(window) = web_sys::window() else {
            log::error!("No window to schedule animation frame");
            return;
        };
        if let Some(callback) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => self.pending.set(Some(id)),
                Err(e) => log::error!("Failed to request animation frame: {:?}", e),
            }
        }
    }
}
