use std::cell::Cell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs_f64() * 1_000.0)
        .unwrap_or(0.0)
}

pub fn millis_from(raw: Option<f64>, default: u32) -> u32 {
    raw.filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.min(f64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

/// Leading-edge gate: the first call in a window passes, the rest are dropped.
#[derive(Clone, Copy, Debug)]
pub struct Throttle {
    limit_ms: f64,
    reopens_at: Option<f64>,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms: limit_ms.max(0.0),
            reopens_at: None,
        }
    }

    pub fn try_acquire(&mut self, now: f64) -> bool {
        match self.reopens_at {
            Some(reopens_at) if now < reopens_at => false,
            _ => {
                self.reopens_at = Some(now + self.limit_ms);
                true
            }
        }
    }
}

pub fn throttle<A, F, C>(limit_ms: f64, clock: C, mut callback: F) -> impl FnMut(A)
where
    F: FnMut(A),
    C: Fn() -> f64,
{
    let mut gate = Throttle::new(limit_ms);
    move |args| {
        if gate.try_acquire(clock()) {
            callback(args);
        }
    }
}

/// Generation counter shared by every pending call of one debounced function.
#[derive(Clone, Debug, Default)]
pub struct Debounce {
    generation: Rc<Cell<u64>>,
}

// Two handles are equal when they share one generation counter.
impl PartialEq for Debounce {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.generation, &other.generation)
    }
}

impl Debounce {
    pub fn arm(&self) -> u64 {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        next
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.generation.get() == token
    }
}
