use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::animate;
use crate::config::SiteConfig;
use crate::dom::{document, viewport_size};
use crate::motion::{
    TypingLoop, TypingTiming, DEFAULT_SMOOTH_SCROLL_MS, DEFAULT_STAGGER_MS, DEFAULT_TYPEWRITER_MS,
};
use crate::notify::{show_notification, NotificationKind};
use crate::scroll::{is_in_viewport, ViewportRect};
use crate::timing::{millis_from, now_millis, throttle, Debounce};

pub fn expose(config: Rc<SiteConfig>, filter_runs: Debounce) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let utils = Object::new();
    export(&utils, "showNotification", show_notification_fn(config));
    export(&utils, "filterProjects", filter_projects_fn(filter_runs));
    export(&utils, "typeWriter", type_writer_fn());
    export(&utils, "debounce", debounce_fn());
    export(&utils, "throttle", throttle_fn());
    export(&utils, "isInViewport", is_in_viewport_fn());

    let animations = Object::new();
    export(&animations, "initTypingAnimation", typing_animation_fn());
    export(&animations, "staggerAnimation", stagger_fn());
    export(&animations, "smoothScrollTo", smooth_scroll_fn());
    export(&animations, "animateCounter", animate_counter_fn());

    export(&window, "portfolioUtils", utils.into());
    export(&window, "portfolioAnimations", animations.into());
}

fn export(target: &JsValue, name: &str, value: JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(name), &value);
}

fn millis_arg(value: &JsValue, default: u32) -> u32 {
    millis_from(value.as_f64(), default)
}

fn show_notification_fn(config: Rc<SiteConfig>) -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue)>::new(move |message: JsValue, kind: JsValue| {
        let message = message.as_string().unwrap_or_default();
        let kind = kind
            .as_string()
            .map(|value| NotificationKind::parse(&value))
            .unwrap_or(NotificationKind::Info);
        show_notification(&config, &message, kind);
    })
    .into_js_value()
}

fn filter_projects_fn(filter_runs: Debounce) -> JsValue {
    Closure::<dyn Fn(JsValue)>::new(move |category: JsValue| {
        let (Some(document), Some(category)) = (document(), category.as_string()) else {
            return;
        };
        animate::filter_projects(&document, &category, &filter_runs);
    })
    .into_js_value()
}

fn type_writer_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue, JsValue)>::new(
        |element: JsValue, text: JsValue, speed: JsValue| {
            let Ok(element) = element.dyn_into::<HtmlElement>() else {
                return;
            };
            let text = text.as_string().unwrap_or_default();
            animate::type_writer(element, text, millis_arg(&speed, DEFAULT_TYPEWRITER_MS));
        },
    )
    .into_js_value()
}

fn debounce_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(|func: JsValue, wait: JsValue| {
        let Ok(func) = func.dyn_into::<Function>() else {
            return JsValue::UNDEFINED;
        };
        let wait = millis_arg(&wait, 0);
        let pending = Debounce::default();

        Closure::<dyn Fn(JsValue)>::new(move |arg: JsValue| {
            let token = pending.arm();
            let pending = pending.clone();
            let func = func.clone();
            Timeout::new(wait, move || {
                if pending.is_current(token) {
                    let _ = func.call1(&JsValue::NULL, &arg);
                }
            })
            .forget();
        })
        .into_js_value()
    })
    .into_js_value()
}

fn throttle_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(|func: JsValue, limit: JsValue| {
        let Ok(func) = func.dyn_into::<Function>() else {
            return JsValue::UNDEFINED;
        };
        let limit = f64::from(millis_arg(&limit, 0));
        let mut gated = throttle(limit, now_millis, move |arg: JsValue| {
            let _ = func.call1(&JsValue::NULL, &arg);
        });

        Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| gated(arg)).into_js_value()
    })
    .into_js_value()
}

fn is_in_viewport_fn() -> JsValue {
    Closure::<dyn Fn(JsValue) -> bool>::new(|element: JsValue| {
        let (Ok(element), Some(window)) = (element.dyn_into::<Element>(), web_sys::window()) else {
            return false;
        };
        let rect = element.get_bounding_client_rect();
        let (width, height) = viewport_size(&window);

        is_in_viewport(
            ViewportRect {
                top: rect.top(),
                left: rect.left(),
                bottom: rect.bottom(),
                right: rect.right(),
            },
            width,
            height,
        )
    })
    .into_js_value()
}

fn typing_animation_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue, JsValue, JsValue, JsValue)>::new(
        |element_id: JsValue, texts: JsValue, speed: JsValue, delete_speed: JsValue, pause: JsValue| {
            let (Some(document), Some(element_id)) = (document(), element_id.as_string()) else {
                return;
            };
            let Some(element) = crate::dom::element_by_id(&document, &element_id) else {
                return;
            };
            let Ok(texts) = texts.dyn_into::<Array>() else {
                return;
            };

            let defaults = TypingTiming::default();
            let timing = TypingTiming {
                type_ms: millis_arg(&speed, defaults.type_ms),
                delete_ms: millis_arg(&delete_speed, defaults.delete_ms),
                pause_ms: millis_arg(&pause, defaults.pause_ms),
                next_text_ms: defaults.next_text_ms,
            };
            let texts: Vec<String> = texts.iter().filter_map(|text| text.as_string()).collect();

            animate::run_typing_loop(
                element,
                TypingLoop::new(texts, timing),
                Rc::new(Cell::new(false)),
            );
        },
    )
    .into_js_value()
}

fn stagger_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue)>::new(|selector: JsValue, delay: JsValue| {
        let (Some(document), Some(selector)) = (document(), selector.as_string()) else {
            return;
        };
        animate::stagger(&document, &selector, millis_arg(&delay, DEFAULT_STAGGER_MS));
    })
    .into_js_value()
}

fn smooth_scroll_fn() -> JsValue {
    Closure::<dyn Fn(JsValue, JsValue)>::new(|target_id: JsValue, duration: JsValue| {
        let (Some(window), Some(target_id)) = (web_sys::window(), target_id.as_string()) else {
            return;
        };
        let duration = duration
            .as_f64()
            .filter(|value| value.is_finite())
            .unwrap_or(DEFAULT_SMOOTH_SCROLL_MS);
        animate::smooth_scroll_to(&window, &target_id, duration);
    })
    .into_js_value()
}

fn animate_counter_fn() -> JsValue {
    Closure::<dyn Fn(JsValue)>::new(|element: JsValue| {
        if let Ok(element) = element.dyn_into::<HtmlElement>() {
            animate::animate_counter(&element);
        }
    })
    .into_js_value()
}
