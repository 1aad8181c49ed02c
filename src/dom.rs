use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::filter::StylePatch;

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn apply_patch(element: &HtmlElement, patch: StylePatch) {
    for &(property, value) in patch {
        set_style(element, property, value);
    }
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn viewport_size(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub fn smooth_scroll_window(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}
