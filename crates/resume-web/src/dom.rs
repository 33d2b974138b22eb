use glam::Vec2;
use resume_core::{PageMetrics, Rect, ViewBand};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
fn js_f32(v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f32 {
    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
}

#[inline]
pub fn scroll_offset(window: &web::Window) -> Vec2 {
    Vec2::new(
        window.scroll_x().unwrap_or(0.0) as f32,
        window.scroll_y().unwrap_or(0.0) as f32,
    )
}

pub fn page_metrics(window: &web::Window, document: &web::Document) -> PageMetrics {
    let document_height = document
        .document_element()
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0);
    PageMetrics {
        viewport_width: js_f32(window.inner_width()),
        viewport_height: js_f32(window.inner_height()),
        document_height,
    }
}

/// Vertical band currently on screen, in document coordinates.
#[inline]
pub fn view_band(window: &web::Window) -> ViewBand {
    ViewBand::new(scroll_offset(window).y, js_f32(window.inner_height()))
}

/// The viewport as a rectangle in document coordinates.
pub fn viewport_rect(window: &web::Window, document: &web::Document) -> Rect {
    let scroll = scroll_offset(window);
    page_metrics(window, document).viewport_at(scroll.x, scroll.y)
}

/// Border box of `el` in document coordinates.
#[inline]
pub fn document_rect(el: &web::Element, scroll: Vec2) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(
        r.left() as f32 + scroll.x,
        r.top() as f32 + scroll.y,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Geometry of a section by id; `None` while it is not in the document.
#[inline]
pub fn section_rect(document: &web::Document, id: &str, scroll: Vec2) -> Option<Rect> {
    document
        .get_element_by_id(id)
        .map(|el| document_rect(&el, scroll))
}

#[inline]
pub fn set_class(document: &web::Document, id: &str, class: &str, on: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let list = el.class_list();
        let _ = if on { list.add_1(class) } else { list.remove_1(class) };
    }
}

/// Size the canvas backing store to the page in CSS pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, page: &PageMetrics) {
    canvas.set_width(page.viewport_width.max(1.0) as u32);
    canvas.set_height(page.document_height.max(1.0) as u32);
    let _ = canvas.set_attribute("style", &crate::markup::canvas_style(page.document_height));
}
