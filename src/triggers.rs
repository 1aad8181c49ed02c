pub const SKILL_BAR_DELAY_MS: u32 = 200;
pub const DEFAULT_SKILL_WIDTH: &str = "0%";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reveal {
    FadeIn,
    SkillBar,
    Counter,
    LazyImage,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub selector: &'static str,
    pub reveal: Reveal,
    pub threshold: Option<f64>,
    pub root_margin: Option<&'static str>,
    pub once: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerStep {
    Ignore,
    Fire { unsubscribe: bool },
}

impl TriggerSpec {
    pub fn step(&self, is_intersecting: bool) -> TriggerStep {
        if is_intersecting {
            TriggerStep::Fire {
                unsubscribe: self.once,
            }
        } else {
            TriggerStep::Ignore
        }
    }
}

// Fade-ins stay subscribed; re-adding `visible` is a no-op.
pub static TRIGGERS: [TriggerSpec; 4] = [
    TriggerSpec {
        selector: ".fade-in-up",
        reveal: Reveal::FadeIn,
        threshold: Some(0.1),
        root_margin: Some("0px 0px -50px 0px"),
        once: false,
    },
    TriggerSpec {
        selector: ".skill-progress",
        reveal: Reveal::SkillBar,
        threshold: Some(0.5),
        root_margin: None,
        once: true,
    },
    TriggerSpec {
        selector: ".counter",
        reveal: Reveal::Counter,
        threshold: Some(0.5),
        root_margin: None,
        once: true,
    },
    TriggerSpec {
        selector: "img[data-src]",
        reveal: Reveal::LazyImage,
        threshold: None,
        root_margin: None,
        once: true,
    },
];

// A lazy image is revealed whether it loads or fails, so broken sources still show alt text.
pub const IMAGE_SETTLE_EVENTS: [&str; 2] = ["load", "error"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillBarGrowth<'a> {
    pub delay_ms: u32,
    pub width: &'a str,
}

impl<'a> SkillBarGrowth<'a> {
    pub fn from_attribute(raw: Option<&'a str>) -> Self {
        Self {
            delay_ms: SKILL_BAR_DELAY_MS,
            width: skill_width(raw),
        }
    }
}

fn skill_width(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SKILL_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_for(reveal: Reveal) -> &'static TriggerSpec {
        TRIGGERS
            .iter()
            .find(|spec| spec.reveal == reveal)
            .expect("every reveal kind has a trigger")
    }

    #[test]
    fn fade_in_fires_early_and_stays_subscribed() {
        let fade = trigger_for(Reveal::FadeIn);

        assert_eq!(fade.threshold, Some(0.1));
        assert_eq!(fade.root_margin, Some("0px 0px -50px 0px"));
        assert_eq!(fade.step(true), TriggerStep::Fire { unsubscribe: false });
        assert_eq!(fade.step(false), TriggerStep::Ignore);
    }

    #[test]
    fn one_shot_triggers_unsubscribe_on_first_fire() {
        for reveal in [Reveal::SkillBar, Reveal::Counter, Reveal::LazyImage] {
            let trigger = trigger_for(reveal);
            assert_eq!(trigger.step(true), TriggerStep::Fire { unsubscribe: true });
            assert_eq!(trigger.step(false), TriggerStep::Ignore);
        }
    }

    #[test]
    fn half_visibility_gates_bars_and_counters() {
        assert_eq!(trigger_for(Reveal::SkillBar).threshold, Some(0.5));
        assert_eq!(trigger_for(Reveal::Counter).threshold, Some(0.5));
        assert_eq!(trigger_for(Reveal::LazyImage).threshold, None);
    }

    #[test]
    fn skill_width_defaults_to_zero() {
        assert_eq!(skill_width(Some("85%")), "85%");
        assert_eq!(skill_width(Some("  ")), "0%");
        assert_eq!(skill_width(None), "0%");
    }

    #[test]
    fn skill_bar_grows_once_after_delay() {
        let trigger = trigger_for(Reveal::SkillBar);
        let mut subscribed = true;
        let mut growths = Vec::new();

        for is_intersecting in [false, true, true, false, true] {
            if !subscribed {
                break;
            }
            if let TriggerStep::Fire { unsubscribe } = trigger.step(is_intersecting) {
                growths.push(SkillBarGrowth::from_attribute(Some("85%")));
                subscribed = !unsubscribe;
            }
        }

        assert_eq!(
            growths,
            vec![SkillBarGrowth {
                delay_ms: 200,
                width: "85%",
            }]
        );
    }

    #[test]
    fn lazy_images_settle_on_failed_loads_too() {
        assert!(IMAGE_SETTLE_EVENTS.contains(&"load"));
        assert!(IMAGE_SETTLE_EVENTS.contains(&"error"));
    }
}
