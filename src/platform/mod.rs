//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic milliseconds)
//! - Asking the player for a name

/// Source of a player name before a run
pub trait NamePrompt {
    /// Ask for a name; None if cancelled or unavailable
    fn ask_name(&mut self) -> Option<String>;
}

/// Never asks; every run uses the default name
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl NamePrompt for NoPrompt {
    fn ask_name(&mut self) -> Option<String> {
        None
    }
}

impl<F> NamePrompt for F
where
    F: FnMut() -> Option<String>,
{
    fn ask_name(&mut self) -> Option<String> {
        self()
    }
}

/// Trim the prompt answer, falling back to `default` when blank or missing
pub fn resolve_name(answer: Option<String>, default: &str) -> String {
    match answer.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default.to_string(),
    }
}

/// `window.prompt` name entry
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPrompt;

#[cfg(target_arch = "wasm32")]
impl NamePrompt for BrowserPrompt {
    fn ask_name(&mut self) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message("Enter your name:") {
            Ok(answer) => answer,
            Err(_) => {
                log::warn!("Name prompt unavailable");
                None
            }
        }
    }
}

/// Milliseconds from a monotonic clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Milliseconds since the first call
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
