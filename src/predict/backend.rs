use anyhow::Result;
use serde_json::{json, Value};

use crate::waste::{PredictionRecord, PREDICTION_FIELD};

/// Output of one classifier run.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Fine-grained waste label, e.g. `"green-glass"`.
    pub label: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Record shape consumed by the enricher.
    pub fn into_record(self) -> PredictionRecord {
        let mut record = PredictionRecord::new();
        record.insert(PREDICTION_FIELD.to_string(), Value::String(self.label));
        record.insert("confidence".to_string(), json!(self.confidence));
        record
    }
}

/// Image classifier backend.
///
/// Implementations receive packed RGB8 pixels (`width * height * 3` bytes)
/// and return a single label. Model loading happens before registration.
pub trait ImageClassifier: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Classify one image.
    fn classify(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<Prediction>;

    /// Optional warm-up hook.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
