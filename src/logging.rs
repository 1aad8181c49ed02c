use crate::config::SiteConfig;
use crate::timing::now_millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

pub fn log_event(config: &SiteConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let payload = event_payload(now_millis() as u64, level, event, fields);
    emit(level, &payload.to_string());
}

fn event_payload(
    ts_millis: u64,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> serde_json::Value {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts_millis)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Error => web_sys::console::error_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, line: &str) {
    if level >= LogLevel::Warn {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_merges_fields_after_envelope() {
        let payload = event_payload(
            1_700_000_000_000,
            LogLevel::Info,
            "contact.sent",
            json!({ "endpoint": "/api/contact" }),
        );

        assert_eq!(payload["ts"], json!(1_700_000_000_000u64));
        assert_eq!(payload["level"], json!("info"));
        assert_eq!(payload["event"], json!("contact.sent"));
        assert_eq!(payload["endpoint"], json!("/api/contact"));
    }

    #[test]
    fn non_object_fields_are_dropped() {
        let payload = event_payload(0, LogLevel::Warn, "effects.skipped", json!("ignored"));
        let object = payload.as_object().expect("payload is an object");

        assert_eq!(object.len(), 3);
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warning"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }
}
