use crate::constants::BACKGROUND_CANVAS_ID;
use crate::dom;
use crate::events::Listener;
use crate::paint;
use crate::scheduler::{callback, WebScheduler};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use resume_core::{BackgroundLoop, FieldParams, ParticleField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

type Shared = Rc<RefCell<Option<BackgroundLoop<WebScheduler>>>>;

/// The animated particle background on `#background-canvas`.
pub struct Background {
    state: Shared,
    _resize: Listener,
}

fn context_2d(document: &web::Document) -> anyhow::Result<(web::HtmlCanvasElement, web::CanvasRenderingContext2d)> {
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(BACKGROUND_CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", BACKGROUND_CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let ctx = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok((canvas, ctx))
}

impl Background {
    pub fn start(window: &web::Window, document: &web::Document) -> anyhow::Result<Self> {
        let (canvas, ctx) = context_2d(document)?;
        let field = ParticleField::new(FieldParams::default(), StdRng::from_entropy())?;
        let state: Shared = Rc::new(RefCell::new(None));

        let on_frame = {
            let weak = Rc::downgrade(&state);
            let window = window.clone();
            let ctx = ctx.clone();
            callback(move || {
                let Some(state) = weak.upgrade() else { return };
                let mut guard = state.borrow_mut();
                let Some(bg) = guard.as_mut() else { return };
                if let Some(list) = bg.on_frame(dom::view_band(&window)) {
                    paint::draw(&ctx, list);
                }
            })
        };

        let on_timeout = {
            let weak = Rc::downgrade(&state);
            let window = window.clone();
            let document = document.clone();
            let canvas = canvas.clone();
            callback(move || {
                let Some(state) = weak.upgrade() else { return };
                let mut guard = state.borrow_mut();
                let Some(bg) = guard.as_mut() else { return };
                let began = Instant::now();
                let page = dom::page_metrics(&window, &document);
                dom::size_canvas(&canvas, &page);
                if let Some(list) = bg.on_resize_settled(page, dom::view_band(&window)) {
                    paint::draw(&ctx, list);
                    log::info!(
                        "background reinit: {} anchors, {} particles in {:?}",
                        bg.field().anchors().len(),
                        bg.field().particles().len(),
                        began.elapsed()
                    );
                }
            })
        };

        let page = dom::page_metrics(window, document);
        dom::size_canvas(&canvas, &page);
        let scheduler = WebScheduler::new(window.clone(), Some(on_frame), Some(on_timeout));
        let bg = BackgroundLoop::start(field, scheduler, page);
        log::info!(
            "background: {} anchors, {} particles on {}x{}",
            bg.field().anchors().len(),
            bg.field().particles().len(),
            page.viewport_width,
            page.document_height
        );
        *state.borrow_mut() = Some(bg);

        let resize = {
            let weak = Rc::downgrade(&state);
            Listener::new(window.as_ref(), "resize", true, move |_| {
                if let Some(state) = weak.upgrade() {
                    if let Some(bg) = state.borrow_mut().as_mut() {
                        bg.on_resize();
                    }
                }
            })?
        };

        Ok(Self {
            state,
            _resize: resize,
        })
    }

    /// Cancel the pending frame and resize timer, then release the callbacks.
    pub fn stop(self) {
        let taken = self.state.borrow_mut().take();
        if let Some(bg) = taken {
            bg.stop();
        }
    }
}
