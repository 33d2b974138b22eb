use crate::dom;
use crate::events::Listener;
use crate::overlay;
use crate::scheduler::{callback, WebScheduler};
use crate::sections;
use resume_core::{ConnectorLoop, SectionTracker, TrackerParams, CONNECTOR_SETTLE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

type Shared = Rc<RefCell<Option<ConnectorLoop<WebScheduler>>>>;
type ActiveCallback = Rc<RefCell<Option<js_sys::Function>>>;

/// Active-section tracking plus the SVG connector overlay.
pub struct Connector {
    state: Shared,
    on_change: ActiveCallback,
    document: web::Document,
    _scroll: Listener,
    _resize: Listener,
}

fn notify(callback: &ActiveCallback, active: Option<String>) {
    // Cloned out so the host may re-register or unmount from inside the call.
    let Some(f) = callback.borrow().clone() else { return };
    let arg = active.map(JsValue::from).unwrap_or(JsValue::NULL);
    if let Err(e) = f.call1(&JsValue::NULL, &arg) {
        log::warn!("active-section callback threw: {:?}", e);
    }
}

impl Connector {
    pub fn start(
        window: &web::Window,
        document: &web::Document,
        ids: &[String],
    ) -> anyhow::Result<Self> {
        let tracker = SectionTracker::new(ids, TrackerParams::default())?;
        let overlay_el = overlay::find(document);
        match &overlay_el {
            Some(el) => overlay::prepare(el),
            None => log::warn!("connector overlay element missing; tracking sections only"),
        }
        let state: Shared = Rc::new(RefCell::new(None));
        let on_change: ActiveCallback = Rc::new(RefCell::new(None));

        let on_frame = {
            let weak = Rc::downgrade(&state);
            let on_change = on_change.clone();
            let window = window.clone();
            let document = document.clone();
            callback(move || {
                let Some(state) = weak.upgrade() else { return };
                let changed = {
                    let mut guard = state.borrow_mut();
                    let Some(c) = guard.as_mut() else { return };
                    let scroll = dom::scroll_offset(&window);
                    let page = dom::page_metrics(&window, &document);
                    let viewport = page.viewport_at(scroll.x, scroll.y);
                    let Some(update) =
                        c.on_frame(&viewport, |id| dom::section_rect(&document, id, scroll))
                    else {
                        return;
                    };
                    if let Some(el) = &overlay_el {
                        overlay::render(el, update.segments, page.document_height, scroll);
                    }
                    let observation = update.observation;
                    sections::apply(&document, c.tracker(), &observation);
                    observation
                        .active_changed()
                        .then(|| c.active().map(str::to_string))
                };
                if let Some(active) = changed {
                    log::info!("active section: {}", active.as_deref().unwrap_or("none"));
                    notify(&on_change, active);
                }
            })
        };

        let on_timeout = {
            let weak = Rc::downgrade(&state);
            callback(move || {
                if let Some(state) = weak.upgrade() {
                    if let Some(c) = state.borrow_mut().as_mut() {
                        c.on_settle_timeout();
                    }
                }
            })
        };

        let scheduler = WebScheduler::new(window.clone(), Some(on_frame), Some(on_timeout));
        *state.borrow_mut() = Some(ConnectorLoop::start(tracker, scheduler, CONNECTOR_SETTLE));

        let listen = |kind: &'static str| {
            let weak = Rc::downgrade(&state);
            Listener::new(window.as_ref(), kind, true, move |_| {
                if let Some(state) = weak.upgrade() {
                    if let Some(c) = state.borrow_mut().as_mut() {
                        c.request_update();
                    }
                }
            })
        };
        let scroll = listen("scroll")?;
        let resize = listen("resize")?;

        Ok(Self {
            state,
            on_change,
            document: document.clone(),
            _scroll: scroll,
            _resize: resize,
        })
    }

    pub fn active(&self) -> Option<String> {
        self.state
            .borrow()
            .as_ref()
            .and_then(|c| c.active().map(str::to_string))
    }

    pub fn set_on_change(&self, f: Option<js_sys::Function>) {
        *self.on_change.borrow_mut() = f;
    }

    /// Cancel pending work, detach every section and clear the overlay.
    pub fn stop(self) {
        let taken = self.state.borrow_mut().take();
        if let Some(c) = taken {
            sections::clear_focus(&self.document, c.tracker());
            c.stop();
        }
        if let Some(el) = overlay::find(&self.document) {
            overlay::clear(&el);
        }
        self.on_change.borrow_mut().take();
    }
}
