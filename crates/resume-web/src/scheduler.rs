use resume_core::Scheduler;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type Callback = Closure<dyn FnMut()>;

#[inline]
pub fn callback(f: impl FnMut() + 'static) -> Callback {
    Closure::wrap(Box::new(f) as Box<dyn FnMut()>)
}

/// `requestAnimationFrame` / `setTimeout` behind the core [`Scheduler`].
///
/// The scheduler owns the two JS callbacks; the loop that owns the scheduler
/// cancels every outstanding handle before they are released.
pub struct WebScheduler {
    window: web::Window,
    on_frame: Option<Callback>,
    on_timeout: Option<Callback>,
}

impl WebScheduler {
    pub fn new(window: web::Window, on_frame: Option<Callback>, on_timeout: Option<Callback>) -> Self {
        Self {
            window,
            on_frame,
            on_timeout,
        }
    }
}

impl Scheduler for WebScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let cb = self.on_frame.as_ref()?;
        match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }

    fn set_timeout(&mut self, delay: Duration) -> Option<i32> {
        let cb = self.on_timeout.as_ref()?;
        let ms = delay.as_millis().min(i32::MAX as u128) as i32;
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
        {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("setTimeout failed: {:?}", e);
                None
            }
        }
    }

    fn clear_timeout(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}
