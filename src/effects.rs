use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, Node, Window,
};

use crate::animate;
use crate::config::SiteConfig;
use crate::dom::{
    element_by_id, query_all, scroll_y, set_style, smooth_scroll_window, viewport_size,
};
use crate::logging::{log_event, LogLevel};
use crate::motion::{
    centered, cursor_enabled, parallax_offset, parallax_speed, scale, translate_y, PointerTrail,
    ANCHOR_OFFSET, CURSOR_DOT_SIZE, CURSOR_RING_SIZE, HOVER_SCALE,
};
use crate::scroll::{anchor_target, back_to_top_visible, scroll_progress, should_reveal, NavState};
use crate::timing::{now_millis, throttle};
use crate::triggers::{
    Reveal, SkillBarGrowth, TriggerSpec, TriggerStep, DEFAULT_SKILL_WIDTH, IMAGE_SETTLE_EVENTS,
    TRIGGERS,
};

const HOVER_TARGETS: &str = "a, button, .project-card, .card";
const CURSOR_DOT_STYLE: &str = "position: fixed; width: 20px; height: 20px; \
    border: 2px solid #000; border-radius: 50%; pointer-events: none; z-index: 9999; \
    transition: transform 0.15s ease; display: block;";
const CURSOR_RING_STYLE: &str = "position: fixed; width: 40px; height: 40px; \
    border: 1px solid rgba(0, 0, 0, 0.3); border-radius: 50%; pointer-events: none; \
    z-index: 9998; transition: transform 0.3s ease; display: block;";

/// Everything wired up on mount; dropping it tears all of it down.
pub struct PageEffects {
    config: Rc<SiteConfig>,
    listeners: Vec<EventListener>,
    observers: Vec<VisibilityObserver>,
    cursor: Option<CursorFollower>,
}

impl Drop for PageEffects {
    fn drop(&mut self) {
        log_event(
            &self.config,
            LogLevel::Debug,
            "effects.torn_down",
            json!({
                "listeners": self.listeners.len(),
                "observers": self.observers.len(),
                "cursor": self.cursor.is_some(),
            }),
        );
    }
}

pub fn install(config: Rc<SiteConfig>) -> PageEffects {
    let mut effects = PageEffects {
        config: config.clone(),
        listeners: Vec::new(),
        observers: Vec::new(),
        cursor: None,
    };

    let Some(window) = web_sys::window() else {
        return effects;
    };
    let Some(document) = window.document() else {
        return effects;
    };

    effects.listeners.extend(navigation(&window, &document, &config));
    effects.listeners.extend(scroll_progress_bar(&window, &document));
    effects.listeners.extend(back_to_top(&window, &document, &config));
    effects.listeners.extend(smooth_anchors(&window, &document));
    effects.listeners.extend(reveal_on_scroll(&window, &document));
    effects.listeners.extend(parallax(&window, &document, &config));
    effects.observers = TRIGGERS
        .iter()
        .filter_map(|spec| observe(&document, *spec))
        .collect();
    effects.cursor = CursorFollower::start(&window, &document, &config);

    log_event(
        &config,
        LogLevel::Info,
        "effects.installed",
        json!({
            "listeners": effects.listeners.len(),
            "observers": effects.observers.len(),
            "cursor": effects.cursor.is_some(),
        }),
    );

    effects
}

fn navigation(window: &Window, document: &Document, config: &SiteConfig) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    if let (Some(button), Some(menu)) = (
        element_by_id(document, "mobile-menu-btn"),
        element_by_id(document, "mobile-menu"),
    ) {
        let toggle_button = button.clone();
        let toggle_menu = menu.clone();
        listeners.push(EventListener::new(&button, "click", move |_| {
            let classes = toggle_menu.class_list();
            let _ = classes.toggle("hidden");
            set_menu_icon(&toggle_button, !classes.contains("hidden"));
        }));

        listeners.push(EventListener::new(document, "click", move |event: &Event| {
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            let inside = button.contains(target.as_ref()) || menu.contains(target.as_ref());
            let classes = menu.class_list();

            if !inside && !classes.contains("hidden") {
                let _ = classes.add_1("hidden");
                set_menu_icon(&button, false);
            }
        }));
    }

    if let Some(navbar) = element_by_id(document, "navbar") {
        let hide_after = f64::from(config.nav_hide_offset);
        let scroll_window = window.clone();
        let mut nav = NavState::default();

        listeners.push(EventListener::new(window, "scroll", move |_| {
            let frame = nav.on_scroll(scroll_y(&scroll_window), hide_after);
            let _ = navbar.class_list().toggle_with_force("shadow-lg", frame.shadow);
            set_style(&navbar, "transform", frame.transform());
        }));
    }

    listeners
}

fn set_menu_icon(button: &HtmlElement, open: bool) {
    if let Ok(Some(icon)) = button.query_selector("i") {
        let classes = icon.class_list();
        let _ = classes.toggle_with_force("fa-bars", !open);
        let _ = classes.toggle_with_force("fa-times", open);
    }
}

fn scroll_progress_bar(window: &Window, document: &Document) -> Option<EventListener> {
    let bar = element_by_id(document, "scroll-progress")?;
    let root = document.document_element()?;
    let scroll_window = window.clone();

    Some(EventListener::new(window, "scroll", move |_| {
        let percent = scroll_progress(
            scroll_y(&scroll_window),
            f64::from(root.scroll_height()),
            f64::from(root.client_height()),
        );
        set_style(&bar, "width", &format!("{percent}%"));
    }))
}

fn back_to_top(window: &Window, document: &Document, config: &SiteConfig) -> Vec<EventListener> {
    let Some(button) = element_by_id(document, "back-to-top") else {
        return Vec::new();
    };

    let threshold = f64::from(config.back_to_top_offset);
    let scroll_window = window.clone();
    let scroll_button = button.clone();
    let on_scroll = EventListener::new(window, "scroll", move |_| {
        let visible = back_to_top_visible(scroll_y(&scroll_window), threshold);
        let _ = scroll_button.class_list().toggle_with_force("show", visible);
    });

    let click_window = window.clone();
    let on_click = EventListener::new_with_options(
        &button,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            smooth_scroll_window(&click_window, 0.0);
        },
    );

    vec![on_scroll, on_click]
}

fn smooth_anchors(window: &Window, document: &Document) -> Vec<EventListener> {
    query_all(document, "a[href^=\"#\"]")
        .into_iter()
        .map(|anchor| {
            let link = anchor.clone();
            let window = window.clone();
            let document = document.clone();

            EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let Some(href) = link.get_attribute("href") else {
                        return;
                    };
                    let Some(selector) = anchor_target(&href) else {
                        return;
                    };
                    event.prevent_default();

                    let target = document
                        .query_selector(selector)
                        .ok()
                        .flatten()
                        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
                    if let Some(target) = target {
                        smooth_scroll_window(&window, f64::from(target.offset_top()) - ANCHOR_OFFSET);
                    }
                },
            )
        })
        .collect()
}

fn reveal_on_scroll(window: &Window, document: &Document) -> Option<EventListener> {
    let targets = query_all(document, ".reveal");
    if targets.is_empty() {
        return None;
    }

    let scroll_window = window.clone();
    Some(EventListener::new(window, "scroll", move |_| {
        let (_, viewport_height) = viewport_size(&scroll_window);
        for element in &targets {
            if should_reveal(element.get_bounding_client_rect().top(), viewport_height) {
                let _ = element.class_list().add_1("active");
            }
        }
    }))
}

fn parallax(window: &Window, document: &Document, config: &SiteConfig) -> Option<EventListener> {
    let layers: Vec<(HtmlElement, f64)> = query_all(document, ".parallax")
        .into_iter()
        .map(|element| {
            let speed = parallax_speed(element.get_attribute("data-speed").as_deref());
            (element, speed)
        })
        .collect();
    if layers.is_empty() {
        return None;
    }

    let scroll_window = window.clone();
    let mut update = throttle(f64::from(config.parallax_throttle_ms), now_millis, move |()| {
        let scrolled = scroll_y(&scroll_window);
        for (element, speed) in &layers {
            set_style(element, "transform", &translate_y(parallax_offset(scrolled, *speed)));
        }
    });

    Some(EventListener::new(window, "scroll", move |_| update(())))
}

struct VisibilityObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for VisibilityObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe(document: &Document, spec: TriggerSpec) -> Option<VisibilityObserver> {
    let targets = query_all(document, spec.selector);
    if targets.is_empty() {
        return None;
    }
    for target in &targets {
        prepare(spec.reveal, target);
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let TriggerStep::Fire { unsubscribe } = spec.step(entry.is_intersecting()) else {
                    continue;
                };

                let target = entry.target();
                if unsubscribe {
                    observer.unobserve(&target);
                }
                if let Ok(element) = target.dyn_into::<HtmlElement>() {
                    reveal(spec.reveal, element);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    if let Some(threshold) = spec.threshold {
        init.set_threshold(&JsValue::from_f64(threshold));
    }
    if let Some(root_margin) = spec.root_margin {
        init.set_root_margin(root_margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;
    for target in &targets {
        observer.observe(target);
    }

    Some(VisibilityObserver {
        observer,
        _callback: callback,
    })
}

fn prepare(reveal: Reveal, element: &HtmlElement) {
    match reveal {
        Reveal::SkillBar => set_style(element, "width", DEFAULT_SKILL_WIDTH),
        Reveal::Counter => {
            if element.text_content().unwrap_or_default().trim().is_empty() {
                element.set_text_content(Some("0"));
            }
        }
        Reveal::LazyImage => {
            set_style(element, "opacity", "0");
            set_style(element, "transition", "opacity 0.3s ease");
        }
        Reveal::FadeIn => {}
    }
}

fn reveal(reveal: Reveal, element: HtmlElement) {
    match reveal {
        Reveal::FadeIn => {
            let _ = element.class_list().add_1("visible");
        }
        Reveal::SkillBar => {
            let raw = element.get_attribute("data-width");
            let growth = SkillBarGrowth::from_attribute(raw.as_deref());
            let width = growth.width.to_string();
            Timeout::new(growth.delay_ms, move || set_style(&element, "width", &width)).forget();
        }
        Reveal::Counter => animate::animate_counter(&element),
        Reveal::LazyImage => load_deferred_image(element),
    }
}

fn load_deferred_image(element: HtmlElement) {
    let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
        return;
    };
    let Some(source) = image.get_attribute("data-src") else {
        return;
    };

    // Whichever event arrives first releases both listeners.
    let pending: Rc<RefCell<Vec<EventListener>>> = Rc::new(RefCell::new(Vec::new()));
    for event_type in IMAGE_SETTLE_EVENTS {
        let settled = image.clone();
        let release = pending.clone();
        let listener = EventListener::once(&image, event_type, move |_| {
            set_style(&settled, "opacity", "1");
            let listeners = std::mem::take(&mut *release.borrow_mut());
            Timeout::new(0, move || drop(listeners)).forget();
        });
        pending.borrow_mut().push(listener);
    }
    image.set_src(&source);
    let _ = image.remove_attribute("data-src");
}

struct CursorFollower {
    dot: HtmlElement,
    ring: HtmlElement,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    _listeners: Vec<EventListener>,
}

impl CursorFollower {
    fn start(window: &Window, document: &Document, config: &SiteConfig) -> Option<Self> {
        let (viewport_width, _) = viewport_size(window);
        if !cursor_enabled(viewport_width, config.cursor_min_width) {
            log_event(
                config,
                LogLevel::Debug,
                "cursor.skipped",
                json!({ "viewportWidth": viewport_width, "minWidth": config.cursor_min_width }),
            );
            return None;
        }

        let body = document.body()?;
        let dot = overlay(document, "custom-cursor", CURSOR_DOT_STYLE).ok()?;
        let ring = overlay(document, "cursor-follower", CURSOR_RING_STYLE).ok()?;
        body.append_child(&dot).ok()?;
        body.append_child(&ring).ok()?;

        let trail = Rc::new(RefCell::new(PointerTrail::default()));
        let mut listeners = Vec::new();

        {
            let trail = trail.clone();
            let dot = dot.clone();
            listeners.push(EventListener::new(document, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
                trail.borrow_mut().point_to(pointer.0, pointer.1);
                place(&dot, centered(pointer, CURSOR_DOT_SIZE));
            }));
        }

        for target in query_all(document, HOVER_TARGETS) {
            for (event_type, factor) in [("mouseenter", HOVER_SCALE), ("mouseleave", 1.0)] {
                let dot = dot.clone();
                let ring = ring.clone();
                listeners.push(EventListener::new(&target, event_type, move |_| {
                    let transform = scale(factor);
                    set_style(&dot, "transform", &transform);
                    set_style(&ring, "transform", &transform);
                }));
            }
        }

        let frame = Rc::new(RefCell::new(None));
        schedule_follower_frame(trail, ring.clone(), frame.clone());

        Some(Self {
            dot,
            ring,
            frame,
            _listeners: listeners,
        })
    }
}

impl Drop for CursorFollower {
    fn drop(&mut self) {
        self.frame.borrow_mut().take();
        self.dot.remove();
        self.ring.remove();
    }
}

fn schedule_follower_frame(
    trail: Rc<RefCell<PointerTrail>>,
    ring: HtmlElement,
    slot: Rc<RefCell<Option<AnimationFrame>>>,
) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |_| {
        let follower = trail.borrow_mut().step();
        place(&ring, centered(follower, CURSOR_RING_SIZE));
        schedule_follower_frame(trail, ring, next_slot);
    });
    *slot.borrow_mut() = Some(handle);
}

fn overlay(document: &Document, class_name: &str, css: &str) -> Result<HtmlElement, JsValue> {
    let element = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    element.set_class_name(class_name);
    element.set_attribute("style", css)?;
    Ok(element)
}

fn place(element: &HtmlElement, (left, top): (f64, f64)) {
    set_style(element, "left", &format!("{left}px"));
    set_style(element, "top", &format!("{top}px"));
}
