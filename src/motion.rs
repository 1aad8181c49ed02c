pub const COUNTER_TICK_MS: u32 = 16;
pub const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
pub const FOLLOWER_EASING: f64 = 0.1;
pub const CURSOR_DOT_SIZE: f64 = 20.0;
pub const CURSOR_RING_SIZE: f64 = 40.0;
pub const HOVER_SCALE: f64 = 1.5;
pub const ANCHOR_OFFSET: f64 = 80.0;
pub const DEFAULT_SMOOTH_SCROLL_MS: f64 = 1_000.0;
pub const DEFAULT_STAGGER_MS: u32 = 100;
pub const DEFAULT_TYPEWRITER_MS: u32 = 100;

pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|value| value * sign)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterFrame {
    Running(i64),
    Done(i64),
}

impl CounterFrame {
    pub fn value(self) -> i64 {
        match self {
            Self::Running(value) | Self::Done(value) => value,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: i64, duration_ms: u32) -> Self {
        let ticks = f64::from(duration_ms) / f64::from(COUNTER_TICK_MS);
        let increment = if ticks > 0.0 {
            target as f64 / ticks
        } else {
            target as f64
        };

        Self {
            target,
            increment,
            current: 0.0,
            finished: false,
        }
    }

    pub fn from_attributes(target: Option<&str>, duration: Option<&str>) -> Self {
        let target = target.and_then(parse_leading_int).unwrap_or(0);
        let duration = duration
            .and_then(parse_leading_int)
            .filter(|value| *value > 0)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(DEFAULT_COUNTER_DURATION_MS);

        Self::new(target, duration)
    }

    #[cfg(test)]
    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn tick(&mut self) -> CounterFrame {
        if self.finished {
            return CounterFrame::Done(self.target);
        }

        self.current += self.increment;

        // A non-positive step can never climb to the target; snap instead of spinning.
        if self.increment <= 0.0 || self.current >= self.target as f64 {
            self.finished = true;
            CounterFrame::Done(self.target)
        } else {
            CounterFrame::Running(self.current.floor() as i64)
        }
    }
}

pub fn parallax_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

pub fn parallax_offset(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

pub fn translate_y(offset_px: f64) -> String {
    format!("translateY({offset_px}px)")
}

pub fn scale(factor: f64) -> String {
    format!("scale({factor})")
}

pub fn centered(point: (f64, f64), size: f64) -> (f64, f64) {
    (point.0 - size / 2.0, point.1 - size / 2.0)
}

pub fn cursor_enabled(viewport_width: f64, min_width: u32) -> bool {
    viewport_width > f64::from(min_width)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerTrail {
    pointer: (f64, f64),
    follower: (f64, f64),
}

impl PointerTrail {
    pub fn point_to(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    #[cfg(test)]
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    #[cfg(test)]
    pub fn follower(&self) -> (f64, f64) {
        self.follower
    }

    pub fn step(&mut self) -> (f64, f64) {
        self.follower.0 += (self.pointer.0 - self.follower.0) * FOLLOWER_EASING;
        self.follower.1 += (self.pointer.1 - self.follower.1) * FOLLOWER_EASING;
        self.follower
    }
}

pub fn ease_in_out_quad(elapsed: f64, start: f64, distance: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return start + distance;
    }

    let t = elapsed / (duration / 2.0);
    if t < 1.0 {
        return distance / 2.0 * t * t + start;
    }

    let t = t - 1.0;
    -distance / 2.0 * (t * (t - 2.0) - 1.0) + start
}

pub fn stagger_delay(index: usize, delay_ms: u32) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(delay_ms)
}

pub fn typed_prefix(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_ms: u32,
    pub next_text_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            pause_ms: 2_000,
            next_text_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct TypingLoop {
    texts: Vec<Vec<char>>,
    timing: TypingTiming,
    text_index: usize,
    char_index: usize,
    deleting: bool,
}

impl TypingLoop {
    pub fn new<I, S>(texts: I, timing: TypingTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            texts: texts
                .into_iter()
                .map(|text| text.as_ref().chars().collect())
                .collect(),
            timing,
            text_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    pub fn step(&mut self) -> Option<TypingFrame> {
        let current = self.texts.get(self.text_index)?;
        let len = current.len();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }
        let text: String = current[..self.char_index].iter().collect();

        let mut delay_ms = if self.deleting {
            self.timing.delete_ms
        } else {
            self.timing.type_ms
        };

        if !self.deleting && self.char_index == len {
            delay_ms = self.timing.pause_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.text_index = (self.text_index + 1) % self.texts.len();
            delay_ms = self.timing.next_text_ms;
        }

        Some(TypingFrame { text, delay_ms })
    }
}
