use crate::constants::{CURSOR_HOVER_CLASS, CURSOR_ID, ERROR_ID, OVERLAY_ID};
use crate::dom;
use web_sys as web;

/// Fade the intro overlay; it is taken out of layout once fully transparent.
pub fn set_opacity(document: &web::Document, opacity: f32) {
    let Some(el) = dom::html_element(document, OVERLAY_ID) else {
        return;
    };
    let style = el.style();
    _ = style.set_property("opacity", &format!("{:.3}", opacity.clamp(0.0, 1.0)));
    if opacity <= 0.0 {
        _ = el.class_list().add_1("hidden");
        _ = style.set_property("display", "none");
    }
}

pub fn set_cursor(document: &web::Document, transform: &str, hovered: bool) {
    let Some(el) = dom::html_element(document, CURSOR_ID) else {
        return;
    };
    _ = el.style().set_property("transform", transform);
    let cl = el.class_list();
    _ = if hovered {
        cl.add_1(CURSOR_HOVER_CLASS)
    } else {
        cl.remove_1(CURSOR_HOVER_CLASS)
    };
}

/// Show a load failure in place of the reveal.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = dom::html_element(document, ERROR_ID) {
        el.set_text_content(Some(message));
        _ = el.style().set_property("display", "block");
    }
}
