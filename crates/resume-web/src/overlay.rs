use crate::constants::CONNECTOR_OVERLAY_ID;
use crate::dom;
use crate::markup;
use glam::Vec2;
use resume_core::LineSegment;
use web_sys as web;

#[inline]
pub fn find(document: &web::Document) -> Option<web::Element> {
    document.get_element_by_id(CONNECTOR_OVERLAY_ID)
}

/// Make the overlay inert for pointers and assistive technology.
#[inline]
pub fn prepare(el: &web::Element) {
    let _ = el.set_attribute("aria-hidden", "true");
}

/// Redraw the overlay for the given segments.
pub fn render(el: &web::Element, segments: &[LineSegment], document_height: f32, scroll: Vec2) {
    let origin = dom::document_rect(el, scroll);
    let _ = el.set_attribute("style", &markup::overlay_style(document_height));
    el.set_inner_html(&markup::connector_svg(
        segments,
        Vec2::new(origin.left, origin.top),
    ));
}

#[inline]
pub fn clear(el: &web::Element) {
    el.set_inner_html("");
}
