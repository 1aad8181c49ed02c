use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::config::SiteConfig;
use crate::dom::{document, set_style};

const NOTIFICATION_ID: &str = "notification";
const FADE_OUT_MS: u32 = 300;
const BASE_CLASSES: &str =
    "fixed top-20 right-4 max-w-md p-4 rounded-lg shadow-xl z-50 transform transition-all duration-300";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    fn palette(self) -> &'static str {
        match self {
            Self::Success => "bg-green-500 text-white",
            Self::Error => "bg-red-500 text-white",
            Self::Info => "bg-blue-500 text-white",
        }
    }
}

pub fn show_notification(config: &SiteConfig, message: &str, kind: NotificationKind) {
    let Some(document) = document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    if let Some(existing) = document.get_element_by_id(NOTIFICATION_ID) {
        existing.remove();
    }

    let Ok(notification) = build_notification(&document, message, kind) else {
        return;
    };
    if body.append_child(&notification).is_err() {
        return;
    }

    Timeout::new(config.notification_ms, move || {
        set_style(&notification, "opacity", "0");
        set_style(&notification, "transform", "translateX(100%)");
        Timeout::new(FADE_OUT_MS, move || notification.remove()).forget();
    })
    .forget();
}

fn build_notification(
    document: &Document,
    message: &str,
    kind: NotificationKind,
) -> Result<HtmlElement, JsValue> {
    let notification = create(document, "div")?;
    notification.set_id(NOTIFICATION_ID);
    notification.set_class_name(&format!("{BASE_CLASSES} {}", kind.palette()));

    let row = create(document, "div")?;
    row.set_class_name("flex items-start");

    let copy = create(document, "div")?;
    copy.set_class_name("flex-1");

    let text = create(document, "p")?;
    text.set_class_name("font-medium");
    for (index, line) in message.lines().enumerate() {
        if index > 0 {
            text.append_child(&document.create_element("br")?)?;
        }
        text.append_with_str_1(line)?;
    }

    let close = create(document, "button")?;
    close.set_class_name("ml-4 text-white hover:text-gray-200");
    close.set_attribute("type", "button")?;
    close.set_attribute("aria-label", "Dismiss notification")?;
    let icon = create(document, "i")?;
    icon.set_class_name("fas fa-times");
    close.append_child(&icon)?;

    let dismissed = notification.clone();
    EventListener::once(&close, "click", move |_| dismissed.remove()).forget();

    copy.append_child(&text)?;
    row.append_child(&copy)?;
    row.append_child(&close)?;
    notification.append_child(&row)?;

    Ok(notification)
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)
}
