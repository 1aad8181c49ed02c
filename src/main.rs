#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod contact;
mod filter;
mod logging;
mod motion;
mod scroll;
mod timing;
mod triggers;

#[cfg(target_arch = "wasm32")]
mod animate;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod effects;
#[cfg(target_arch = "wasm32")]
mod frontend;
#[cfg(target_arch = "wasm32")]
mod globals;
#[cfg(target_arch = "wasm32")]
mod notify;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    logging::log_event(
        &config::SiteConfig::default(),
        logging::LogLevel::Warn,
        "frontend.native_build",
        serde_json::json!({
            "hint": "This project is frontend-only. Run `trunk serve` or `trunk build --release`.",
        }),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
