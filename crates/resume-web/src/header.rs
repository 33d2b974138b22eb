use crate::constants::{HEADER_NAME_ATTR, HEADER_NAME_ID};
use crate::scheduler::{callback, WebScheduler};
use resume_core::{Typewriter, TypewriterLoop, TYPEWRITER_STEP};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

type Shared = Rc<RefCell<Option<TypewriterLoop<WebScheduler>>>>;

/// Types the candidate's name into `#header-name`.
pub struct Header {
    state: Shared,
    el: web::Element,
    full: String,
}

impl Header {
    /// `None` when the page has no header element or nothing to type.
    pub fn start(window: &web::Window, document: &web::Document) -> Option<Self> {
        let el = document.get_element_by_id(HEADER_NAME_ID)?;
        let name = el
            .get_attribute(HEADER_NAME_ATTR)
            .or_else(|| el.text_content())
            .unwrap_or_default();
        let typewriter = Typewriter::new(&name);
        if typewriter.is_done() {
            return None;
        }
        let full = typewriter.full_text().to_string();
        el.set_text_content(Some(""));

        let state: Shared = Rc::new(RefCell::new(None));
        let on_timeout = {
            let weak = Rc::downgrade(&state);
            let el = el.clone();
            callback(move || {
                let Some(state) = weak.upgrade() else { return };
                let mut guard = state.borrow_mut();
                let Some(tw) = guard.as_mut() else { return };
                if let Some(text) = tw.on_timeout() {
                    el.set_text_content(Some(text));
                }
            })
        };
        let scheduler = WebScheduler::new(window.clone(), None, Some(on_timeout));
        *state.borrow_mut() = Some(TypewriterLoop::start(typewriter, scheduler, TYPEWRITER_STEP));
        Some(Self { state, el, full })
    }

    /// Stop typing and show the whole name.
    pub fn stop(self) {
        let taken = self.state.borrow_mut().take();
        if let Some(tw) = taken {
            tw.stop();
        }
        self.el.set_text_content(Some(&self.full));
    }
}
