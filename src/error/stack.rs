use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::backtrace::Backtrace;

static FRAME_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+: ").expect("frame pattern is a valid regex"));

/// Call-stack snapshot taken when an [`Error`](super::Error) is created.
///
/// Each frame is rendered as `symbol at file:line:col` when location information is available.
/// Serializes as a JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackTrace {
    frames: Vec<String>,
}

impl StackTrace {
    /// Captures the current stack regardless of `RUST_BACKTRACE`, dropping the capture
    /// machinery plus `skip` more innermost frames.
    #[inline(never)]
    pub(crate) fn capture(skip: usize) -> Self {
        let backtrace = Backtrace::force_capture();
        Self::from_rendered(&backtrace.to_string(), skip)
    }

    fn from_rendered(text: &str, skip: usize) -> Self {
        let mut frames: Vec<String> = Vec::new();
        for line in text.lines() {
            if let Some(m) = FRAME_START.find(line) {
                frames.push(line[m.end()..].trim().to_owned());
            } else if let Some(last) = frames.last_mut() {
                last.push(' ');
                last.push_str(line.trim());
            }
        }

        let internal = frames.iter().take_while(|f| is_capture_frame(f)).count();
        let cut = (internal + skip).min(frames.len());
        frames.drain(..cut);

        Self { frames }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn is_capture_frame(frame: &str) -> bool {
    frame.starts_with("std::backtrace")
        || frame.starts_with("errclass::error::stack::")
        || frame.starts_with("errclass::error::class::")
}
