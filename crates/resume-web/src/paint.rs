use crate::markup::{glow_fill, glow_shadow};
use resume_core::DrawList;
use std::f64::consts::TAU;
use web_sys as web;

/// Clear the surface and draw every glow in list order.
pub fn draw(ctx: &web::CanvasRenderingContext2d, list: &DrawList) {
    ctx.clear_rect(0.0, 0.0, list.width as f64, list.height as f64);
    for g in &list.glows {
        ctx.begin_path();
        let _ = ctx.arc(g.position.x as f64, g.position.y as f64, g.radius as f64, 0.0, TAU);
        ctx.set_fill_style_str(&glow_fill(g));
        ctx.set_shadow_color(&glow_shadow(g));
        ctx.set_shadow_blur(g.blur as f64);
        ctx.fill();
    }
    ctx.set_shadow_blur(0.0);
}
