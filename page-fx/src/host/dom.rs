//! Browser implementation of [`Page`] over `web-sys`.

use std::cell::RefCell;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, IntersectionObserver, Node, Window};

use super::Page;
use crate::avatar::Rect;
use crate::error::{FxError, Result};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// The live document, plus the reveal observer once one is installed.
pub struct DomPage {
    window: Window,
    document: Document,
    observer: RefCell<Option<IntersectionObserver>>,
}

/// Render a thrown JS value for an error message.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

fn js_err(op: &'static str) -> impl Fn(JsValue) -> FxError {
    move |value| FxError::dom(format!("{op}: {}", describe_js(&value)))
}

fn collect_elements(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn as_html(el: &Element) -> Result<&HtmlElement> {
    el.dyn_ref::<HtmlElement>()
        .ok_or_else(|| FxError::dom(format!("<{}> has no inline style", el.tag_name())))
}

impl DomPage {
    /// Bind to the global `window`. Fails outside a browser main thread.
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| FxError::dom("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| FxError::dom("window has no document"))?;
        Ok(Self {
            window,
            document,
            observer: RefCell::new(None),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Install the observer that [`Page::observe`] registers elements with.
    pub fn set_observer(&self, observer: IntersectionObserver) {
        *self.observer.borrow_mut() = Some(observer);
    }

    pub fn disconnect_observer(&self) {
        if let Some(observer) = self.observer.borrow_mut().take() {
            observer.disconnect();
        }
    }
}

impl Page for DomPage {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => collect_elements(list),
            Err(e) => {
                tracing::warn!(selector, error = %describe_js(&e), "invalid selector");
                Vec::new()
            }
        }
    }

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        root.query_selector_all(selector)
            .map(collect_elements)
            .unwrap_or_default()
    }

    fn set_text(&self, el: &Element, text: &str) -> Result<()> {
        el.set_text_content(Some(text));
        Ok(())
    }

    fn set_class(&self, el: &Element, class: &str, on: bool) -> Result<()> {
        el.class_list()
            .toggle_with_force(class, on)
            .map(|_| ())
            .map_err(js_err("classList.toggle"))
    }

    fn set_transform(&self, el: &Element, css: &str) -> Result<()> {
        as_html(el)?
            .style()
            .set_property("transform", css)
            .map_err(js_err("style.transform"))
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) -> Result<()> {
        el.set_attribute(name, value).map_err(js_err("setAttribute"))
    }

    fn focus(&self, el: &Element) -> Result<()> {
        as_html(el)?.focus().map_err(js_err("focus"))
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node.as_ref();
        ancestor.contains(Some(node))
    }

    fn bounding_rect(&self, el: &Element) -> Rect {
        let r = el.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.width(), r.height())
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn current_year(&self) -> i32 {
        js_sys::Date::new_0().get_full_year() as i32
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|mql| mql.matches())
            .unwrap_or(false)
    }

    fn observe(&self, el: &Element) -> Result<()> {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.observe(el);
        }
        Ok(())
    }

    fn unobserve(&self, el: &Element) -> Result<()> {
        if let Some(observer) = self.observer.borrow().as_ref() {
            observer.unobserve(el);
        }
        Ok(())
    }
}
