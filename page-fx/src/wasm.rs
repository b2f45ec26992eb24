//! WASM entry points: mount the page behaviors on the live document.
//!
//! Build with: `wasm-pack build --target web --features wasm`
//! then call `mount()` (or `mount_preset("subpage")`) once the DOM is ready.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent, MouseEvent,
};

use crate::config::{PageConfig, Preset};
use crate::error::{FxError, Result};
use crate::host::dom::{describe_js, DomPage};
use crate::page::{Motion, PageInteractions};

type Controller = Rc<RefCell<Option<PageInteractions<DomPage>>>>;

/// An attached event listener; dropping it detaches the callback.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Everything a mounted page keeps alive.
struct Mounted {
    controller: Controller,
    _observer_cb: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    _listeners: Vec<Listener>,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

fn report(behavior: &str, err: &FxError) {
    tracing::warn!(behavior, error = %err, "page behavior failed");
    web_sys::console::warn_1(&JsValue::from_str(&format!("[page-fx] {behavior}: {err}")));
}

/// Run `f` against the controller. Skips the event if the controller is
/// still being built or already borrowed by an outer handler.
fn with_controller<R>(
    ctl: &Controller,
    behavior: &str,
    f: impl FnOnce(&mut PageInteractions<DomPage>) -> Result<R>,
) -> Option<R> {
    let mut slot = ctl.try_borrow_mut().ok()?;
    let fx = slot.as_mut()?;
    match f(fx) {
        Ok(r) => Some(r),
        Err(e) => {
            report(behavior, &e);
            None
        }
    }
}

fn event_target_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    passive: bool,
    callback: Closure<dyn FnMut(Event)>,
) -> Result<Listener> {
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(|e| FxError::dom(format!("addEventListener({event}): {}", describe_js(&e))))?;
    Ok(Listener {
        target: target.clone(),
        event,
        callback,
    })
}

fn mount_config(config: PageConfig) -> Result<()> {
    console_error_panic_hook::set_once();
    config.validate()?;

    if MOUNTED.with(|m| m.borrow().is_some()) {
        return Err(FxError::dom("page-fx is already mounted on this document"));
    }

    let controller: Controller = Rc::new(RefCell::new(None));
    let page = DomPage::from_window()?;

    // Reveal observer; the controller registers targets during init.
    let observer_cb = {
        let ctl = controller.clone();
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let hit = entry.is_intersecting();
                    with_controller(&ctl, "reveal", |fx| fx.on_intersection(&target, hit));
                }
            },
        )
    };
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.reveal_threshold));
    init.set_root_margin(&config.reveal_root_margin);
    let observer =
        IntersectionObserver::new_with_options(observer_cb.as_ref().unchecked_ref(), &init)
            .map_err(|e| FxError::dom(format!("IntersectionObserver: {}", describe_js(&e))))?;
    page.set_observer(observer);

    let window = page.window().clone();
    let document = page.document().clone();
    let fx = PageInteractions::init(page, config)?;
    let bindings = fx.bindings();
    let wrapper = fx.avatar_wrapper().cloned();
    let trigger = fx.dropdown_trigger().cloned();
    *controller.borrow_mut() = Some(fx);

    let mut listeners = Vec::new();

    let scroll = if bindings.scroll {
        let ctl = controller.clone();
        Some(listen(
            &window,
            "scroll",
            true,
            Closure::new(move |_e: Event| {
                with_controller(&ctl, "scroll-parallax", |fx| fx.on_scroll());
            }),
        )?)
    } else {
        None
    };

    if let Some(wrapper) = wrapper {
        let ctl = controller.clone();
        listeners.push(listen(
            &wrapper,
            "mousemove",
            true,
            Closure::new(move |e: Event| {
                let Some(e) = e.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = (f64::from(e.client_x()), f64::from(e.client_y()));
                with_controller(&ctl, "avatar", |fx| fx.on_pointer_move(x, y));
            }),
        )?);
        let ctl = controller.clone();
        listeners.push(listen(
            &wrapper,
            "mouseleave",
            true,
            Closure::new(move |_e: Event| {
                with_controller(&ctl, "avatar", |fx| fx.on_pointer_leave());
            }),
        )?);
    }

    if let Some(trigger) = trigger {
        let ctl = controller.clone();
        listeners.push(listen(
            &trigger,
            "click",
            false,
            Closure::new(move |_e: Event| {
                with_controller(&ctl, "dropdown", |fx| fx.on_trigger_click());
            }),
        )?);
        let ctl = controller.clone();
        listeners.push(listen(
            &document,
            "click",
            true,
            Closure::new(move |e: Event| {
                let target = event_target_element(&e);
                with_controller(&ctl, "dropdown", |fx| fx.on_document_click(target.as_ref()));
            }),
        )?);
        let ctl = controller.clone();
        listeners.push(listen(
            &document,
            "keydown",
            false,
            Closure::new(move |e: Event| {
                let Some(key_event) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = key_event.key();
                let target = event_target_element(&e);
                let outcome = with_controller(&ctl, "dropdown", |fx| {
                    fx.on_keydown(&key, target.as_ref())
                });
                if outcome.is_some_and(|o| o.prevent_default) {
                    e.prevent_default();
                }
            }),
        )?);
    }

    // Final step: the reduced-motion override detaches scroll parallax.
    let motion = with_controller(&controller, "reduced-motion", |fx| {
        Ok(fx.apply_motion_preference())
    });
    if motion != Some(Motion::Reduced) {
        listeners.extend(scroll);
    } else {
        // Dropping the listener removes it from the window.
        drop(scroll);
    }

    tracing::debug!(
        listeners = listeners.len(),
        reveal = bindings.reveal_targets,
        "page-fx mounted"
    );
    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            controller,
            _observer_cb: observer_cb,
            _listeners: listeners,
        })
    });
    Ok(())
}

/// Mount with the default (home page) configuration.
#[wasm_bindgen]
pub fn mount() -> std::result::Result<(), JsError> {
    mount_config(PageConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

/// Mount one of the built-in presets: `"home"` or `"subpage"`.
#[wasm_bindgen]
pub fn mount_preset(name: &str) -> std::result::Result<(), JsError> {
    let preset: Preset = name.parse().map_err(|e: FxError| JsError::new(&e.to_string()))?;
    mount_config(PageConfig::preset(preset)).map_err(|e| JsError::new(&e.to_string()))
}

/// Mount with a config object; omitted fields take their defaults.
///
/// Throws if the object does not describe a valid config.
#[wasm_bindgen]
pub fn mount_with(config: JsValue) -> std::result::Result<(), JsError> {
    let config: PageConfig =
        serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?;
    mount_config(config).map_err(|e| JsError::new(&e.to_string()))
}

/// The default config as a plain object, for pages that tweak a few fields.
#[wasm_bindgen]
pub fn default_config() -> std::result::Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&PageConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

/// Detach everything `mount` installed. Mostly useful for hot reload.
#[wasm_bindgen]
pub fn unmount() {
    let mounted = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(mounted) = mounted {
        if let Some(fx) = mounted.controller.borrow().as_ref() {
            fx.page().disconnect_observer();
        }
    }
}
