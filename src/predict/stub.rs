use anyhow::{anyhow, Result};

use super::backend::{ImageClassifier, Prediction};
use super::frame::expected_rgb_len;

/// Stub backend for testing and demos. Answers the same label for every image.
pub struct FixedLabelClassifier {
    label: String,
}

impl FixedLabelClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ImageClassifier for FixedLabelClassifier {
    fn name(&self) -> &'static str {
        "fixed-label"
    }

    fn classify(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<Prediction> {
        let expected = expected_rgb_len(width, height)?;
        if pixels.len() != expected {
            return Err(anyhow!(
                "expected {} RGB bytes, received {}",
                expected,
                pixels.len()
            ));
        }
        Ok(Prediction::new(self.label.clone(), 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_configured_label() {
        let mut backend = FixedLabelClassifier::new("battery");
        let prediction = backend.classify(&[0u8; 12], 2, 2).unwrap();
        assert_eq!(prediction.label, "battery");
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn rejects_short_pixel_buffer() {
        let mut backend = FixedLabelClassifier::new("battery");
        assert!(backend.classify(&[0u8; 5], 2, 2).is_err());
    }
}
