#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod background;
mod connector;
mod constants;
mod dom;
mod events;
mod header;
mod markup;
mod overlay;
mod paint;
mod scheduler;
mod sections;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("resume-web loaded");
    Ok(())
}

struct Mounted {
    background: Option<background::Background>,
    connector: connector::Connector,
    header: Option<header::Header>,
}

impl Mounted {
    fn stop(self) {
        if let Some(bg) = self.background {
            bg.stop();
        }
        self.connector.stop();
        if let Some(h) = self.header {
            h.stop();
        }
    }
}

/// Live page effects. Dropping or unmounting stops every loop and listener.
#[wasm_bindgen]
pub struct ResumeHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl ResumeHandle {
    /// Id of the section currently in focus, if any.
    pub fn active_section(&self) -> Option<String> {
        self.inner.as_ref().and_then(|m| m.connector.active())
    }

    /// Register `callback(id | null)`, called whenever the active section changes.
    pub fn on_active_change(&self, callback: Option<js_sys::Function>) {
        if let Some(m) = &self.inner {
            m.connector.set_on_change(callback);
        }
    }

    /// Stop everything. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(m) = self.inner.take() {
            m.stop();
            log::info!("unmounted");
        }
    }
}

impl Drop for ResumeHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Start the background, section tracking and header effects for the given
/// section ids, in page order.
#[wasm_bindgen]
pub fn mount(section_ids: js_sys::Array) -> Result<ResumeHandle, JsValue> {
    let ids: Vec<String> = section_ids.iter().filter_map(|v| v.as_string()).collect();
    mount_ids(&ids).map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

fn mount_ids(ids: &[String]) -> anyhow::Result<ResumeHandle> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;

    let background = match background::Background::start(&window, &document) {
        Ok(bg) => Some(bg),
        Err(e) => {
            log::warn!("background disabled: {e:#}");
            None
        }
    };
    let connector = connector::Connector::start(&window, &document, ids)?;
    let header = header::Header::start(&window, &document);

    log::info!(
        "mounted {} sections (background: {}, header: {})",
        ids.len(),
        background.is_some(),
        header.is_some()
    );
    Ok(ResumeHandle {
        inner: Some(Mounted {
            background,
            connector,
            header,
        }),
    })
}
