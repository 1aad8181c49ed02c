use crate::logging::LogLevel;

pub const DEFAULT_CONTACT_ENDPOINT: &str = "/api/contact";
const DEFAULT_CURSOR_MIN_WIDTH: u32 = 768;
const DEFAULT_NAV_HIDE_OFFSET: u32 = 100;
const DEFAULT_BACK_TO_TOP_OFFSET: u32 = 300;
const DEFAULT_PARALLAX_THROTTLE_MS: u32 = 10;
const DEFAULT_NOTIFICATION_MS: u32 = 5_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const CURSOR_MIN_WIDTH_BOUNDS: (u32, u32) = (320, 4_096);
const NAV_HIDE_OFFSET_BOUNDS: (u32, u32) = (0, 10_000);
const BACK_TO_TOP_OFFSET_BOUNDS: (u32, u32) = (0, 10_000);
const PARALLAX_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);
const NOTIFICATION_MS_BOUNDS: (u32, u32) = (500, 60_000);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub contact_endpoint: String,
    pub cursor_min_width: u32,
    pub nav_hide_offset: u32,
    pub back_to_top_offset: u32,
    pub parallax_throttle_ms: u32,
    pub notification_ms: u32,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
            cursor_min_width: DEFAULT_CURSOR_MIN_WIDTH,
            nav_hide_offset: DEFAULT_NAV_HIDE_OFFSET,
            back_to_top_offset: DEFAULT_BACK_TO_TOP_OFFSET,
            parallax_throttle_ms: DEFAULT_PARALLAX_THROTTLE_MS,
            notification_ms: DEFAULT_NOTIFICATION_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let contact_endpoint = parse_non_empty_string(lookup("data-contact-endpoint"))
            .unwrap_or_else(|| DEFAULT_CONTACT_ENDPOINT.to_string());
        let cursor_min_width = parse_u32_with_bounds(
            lookup("data-cursor-min-width"),
            DEFAULT_CURSOR_MIN_WIDTH,
            CURSOR_MIN_WIDTH_BOUNDS,
        );
        let nav_hide_offset = parse_u32_with_bounds(
            lookup("data-nav-hide-offset"),
            DEFAULT_NAV_HIDE_OFFSET,
            NAV_HIDE_OFFSET_BOUNDS,
        );
        let back_to_top_offset = parse_u32_with_bounds(
            lookup("data-back-to-top-offset"),
            DEFAULT_BACK_TO_TOP_OFFSET,
            BACK_TO_TOP_OFFSET_BOUNDS,
        );
        let parallax_throttle_ms = parse_u32_with_bounds(
            lookup("data-parallax-throttle-ms"),
            DEFAULT_PARALLAX_THROTTLE_MS,
            PARALLAX_THROTTLE_MS_BOUNDS,
        );
        let notification_ms = parse_u32_with_bounds(
            lookup("data-notification-ms"),
            DEFAULT_NOTIFICATION_MS,
            NOTIFICATION_MS_BOUNDS,
        );
        let log_level = parse_non_empty_string(lookup("data-log-level"))
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            contact_endpoint,
            cursor_min_width,
            nav_hide_offset,
            back_to_top_offset,
            parallax_throttle_ms,
            notification_ms,
            log_level,
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(element: &web_sys::Element) -> Self {
        Self::from_lookup(|name| element.get_attribute(name))
    }
}

fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> SiteConfig {
        let attributes: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SiteConfig::from_lookup(|name| attributes.get(name).cloned())
    }

    #[test]
    fn missing_attributes_use_defaults() {
        assert_eq!(config_from(&[]), SiteConfig::default());
    }

    #[test]
    fn in_range_overrides_are_applied() {
        let config = config_from(&[
            ("data-contact-endpoint", " /contact/send "),
            ("data-cursor-min-width", "1024"),
            ("data-parallax-throttle-ms", "16"),
            ("data-log-level", "debug"),
        ]);

        assert_eq!(config.contact_endpoint, "/contact/send");
        assert_eq!(config.cursor_min_width, 1024);
        assert_eq!(config.parallax_throttle_ms, 16);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn out_of_range_or_malformed_values_fall_back() {
        let config = config_from(&[
            ("data-contact-endpoint", "   "),
            ("data-notification-ms", "10"),
            ("data-parallax-throttle-ms", "0"),
            ("data-nav-hide-offset", "lots"),
            ("data-log-level", "verbose"),
        ]);

        assert_eq!(config.contact_endpoint, DEFAULT_CONTACT_ENDPOINT);
        assert_eq!(config.notification_ms, DEFAULT_NOTIFICATION_MS);
        assert_eq!(config.parallax_throttle_ms, DEFAULT_PARALLAX_THROTTLE_MS);
        assert_eq!(config.nav_hide_offset, DEFAULT_NAV_HIDE_OFFSET);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
