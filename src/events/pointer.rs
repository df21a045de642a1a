use crate::dom;
use crate::input;
use splash_core::SplashEngine;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub engine: Rc<RefCell<SplashEngine>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_click(&w);
    wire_resize(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        w.engine.borrow_mut().pointer_moved(pos.x, pos.y);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        let mut engine = w.engine.borrow_mut();
        engine.pointer_moved(pos.x, pos.y);
        engine.click();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(w: &InputWiring) {
    let (width, height) = dom::sync_canvas_backing_size(&w.canvas);
    w.engine.borrow_mut().resize(width, height);

    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (width, height) = dom::sync_canvas_backing_size(&w.canvas);
        log::debug!("[dom] resize {width}x{height}");
        w.engine.borrow_mut().resize(width, height);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
