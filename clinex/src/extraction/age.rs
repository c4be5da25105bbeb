//! Regex-based age detection.

use lazy_static::lazy_static;
use regex::Regex;

use super::AgeCapture;

lazy_static! {
    static ref AGE_REGEX: Regex =
        Regex::new(r"(?i)\b(\d{1,3})[- ]?(years?[- ]old)\b").expect("age pattern is valid");
}

/// Finds ages written as "45-year-old", "45 year old" or "45 years old".
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeDetector {
    capture: AgeCapture,
}

impl AgeDetector {
    /// Create a detector that records the captured number.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given capture mode.
    pub fn with_capture(capture: AgeCapture) -> Self {
        Self { capture }
    }

    /// Return every age match in the order it appears in `text`.
    pub fn detect(&self, text: &str) -> Vec<String> {
        AGE_REGEX
            .captures_iter(text)
            .filter_map(|caps| match self.capture {
                AgeCapture::Number => caps.get(1),
                AgeCapture::Phrase => caps.get(0),
            })
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
