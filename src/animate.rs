use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement, Window};

use crate::dom::{apply_patch, element_by_id, query_all, scroll_y, set_style};
use crate::filter::{button_active, ItemTransition};
use crate::motion::{
    ease_in_out_quad, stagger_delay, typed_prefix, CounterAnimation, CounterFrame, TypingLoop,
    ANCHOR_OFFSET, COUNTER_TICK_MS,
};
use crate::timing::Debounce;

pub fn animate_counter(element: &HtmlElement) {
    let counter = CounterAnimation::from_attributes(
        element.get_attribute("data-target").as_deref(),
        element.get_attribute("data-duration").as_deref(),
    );
    schedule_counter_tick(element.clone(), counter);
}

fn schedule_counter_tick(element: HtmlElement, mut counter: CounterAnimation) {
    Timeout::new(COUNTER_TICK_MS, move || {
        let frame = counter.tick();
        element.set_text_content(Some(&frame.value().to_string()));
        if let CounterFrame::Running(_) = frame {
            schedule_counter_tick(element, counter);
        }
    })
    .forget();
}

pub fn type_writer(element: HtmlElement, text: String, speed_ms: u32) {
    element.set_text_content(Some(""));
    type_next_char(element, text, 1, speed_ms);
}

fn type_next_char(element: HtmlElement, text: String, count: usize, speed_ms: u32) {
    if count > text.chars().count() {
        return;
    }

    element.set_text_content(Some(&typed_prefix(&text, count)));
    Timeout::new(speed_ms, move || {
        type_next_char(element, text, count + 1, speed_ms);
    })
    .forget();
}

pub fn run_typing_loop(element: HtmlElement, mut typing: TypingLoop, stopped: Rc<Cell<bool>>) {
    if stopped.get() {
        return;
    }
    let Some(frame) = typing.step() else {
        return;
    };

    element.set_text_content(Some(&frame.text));
    Timeout::new(frame.delay_ms, move || run_typing_loop(element, typing, stopped)).forget();
}

pub fn stagger(document: &Document, selector: &str, delay_ms: u32) {
    for (index, element) in query_all(document, selector).into_iter().enumerate() {
        set_style(&element, "opacity", "0");
        set_style(&element, "transform", "translateY(20px)");

        Timeout::new(stagger_delay(index, delay_ms), move || {
            set_style(&element, "transition", "all 0.5s ease");
            set_style(&element, "opacity", "1");
            set_style(&element, "transform", "translateY(0)");
        })
        .forget();
    }
}

pub fn smooth_scroll_to(window: &Window, target_id: &str, duration_ms: f64) {
    let Some(document) = window.document() else {
        return;
    };
    let Some(target) = element_by_id(&document, target_id) else {
        return;
    };

    let start = scroll_y(window);
    let distance = f64::from(target.offset_top()) - ANCHOR_OFFSET - start;
    let slot = Rc::new(RefCell::new(None));
    schedule_scroll_frame(window.clone(), ScrollMove { start, distance, duration_ms }, None, slot);
}

#[derive(Clone, Copy)]
struct ScrollMove {
    start: f64,
    distance: f64,
    duration_ms: f64,
}

fn schedule_scroll_frame(
    window: Window,
    scroll: ScrollMove,
    started_at: Option<f64>,
    slot: Rc<RefCell<Option<AnimationFrame>>>,
) {
    let next_slot = slot.clone();
    let handle = request_animation_frame(move |timestamp| {
        let started_at = started_at.unwrap_or(timestamp);
        let elapsed = (timestamp - started_at).min(scroll.duration_ms.max(0.0));
        let position = ease_in_out_quad(elapsed, scroll.start, scroll.distance, scroll.duration_ms);
        window.scroll_to_with_x_and_y(0.0, position);

        if elapsed < scroll.duration_ms {
            schedule_scroll_frame(window, scroll, Some(started_at), next_slot);
        } else {
            next_slot.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(handle);
}

pub fn filter_projects(document: &Document, category: &str, runs: &Debounce) {
    let run = runs.arm();

    for button in query_all(document, ".filter-btn") {
        let active = button_active(category, button.get_attribute("data-category").as_deref());
        let _ = button.class_list().toggle_with_force("active", active);
    }

    for item in query_all(document, ".project-item") {
        let transition =
            ItemTransition::for_item(category, item.get_attribute("data-category").as_deref());
        apply_patch(&item, transition.immediate());

        let (delay_ms, patch) = transition.deferred();
        let runs = runs.clone();
        Timeout::new(delay_ms, move || {
            if runs.is_current(run) {
                apply_patch(&item, patch);
            }
        })
        .forget();
    }
}
