use crate::dom;
use crate::overlay;
use crate::render::CanvasBackend;
use instant::Instant;
use splash_core::SplashEngine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<SplashEngine>>,
    pub backend: CanvasBackend,
    pub document: web::Document,
    pub started: Instant,
    pub last_overlay: Option<f32>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let out = self.engine.borrow_mut().frame(now_ms, &mut self.backend);

        // The overlay is gone for good once it reaches zero.
        if self.last_overlay != Some(out.overlay_opacity) && self.last_overlay != Some(0.0) {
            overlay::set_opacity(&self.document, out.overlay_opacity);
            self.last_overlay = Some(out.overlay_opacity);
        }
        overlay::set_cursor(&self.document, &out.cursor_transform, out.hovered.is_some());

        for action in &out.actions {
            log::info!("[frame] open {action}");
            dom::open_action(action);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
