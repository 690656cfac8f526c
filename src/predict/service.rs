use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::waste::{PredictionRecord, WasteTaxonomy};

use super::backend::ImageClassifier;
use super::frame::{decode_rgb, RgbFrame};
use super::registry::ModelRegistry;

/// Runs uploaded images through a registered classifier and enriches the result.
pub struct PredictionService {
    registry: ModelRegistry,
    taxonomy: WasteTaxonomy,
    backends: HashMap<String, Box<dyn ImageClassifier>>,
}

impl PredictionService {
    pub fn new(registry: ModelRegistry, taxonomy: WasteTaxonomy) -> Self {
        Self {
            registry,
            taxonomy,
            backends: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn taxonomy(&self) -> &WasteTaxonomy {
        &self.taxonomy
    }

    /// Attach a loaded backend to a registered model and warm it up.
    pub fn attach<B>(&mut self, model: &str, mut backend: B) -> Result<()>
    where
        B: ImageClassifier + 'static,
    {
        self.registry.require(model)?;
        backend.warm_up()?;
        log::info!("model {} served by {} backend", model, backend.name());
        self.backends.insert(model.to_string(), Box::new(backend));
        Ok(())
    }

    pub fn is_model_available(&self, model: &str) -> bool {
        self.registry.is_model_available(model)
    }

    /// Decode `image` and classify it with `model`.
    pub fn predict_image(&mut self, image: &[u8], model: &str) -> Result<PredictionRecord> {
        self.registry.require(model)?;
        let frame = decode_rgb(image)?;
        self.predict_frame(&frame, model)
    }

    pub fn predict_frame(&mut self, frame: &RgbFrame, model: &str) -> Result<PredictionRecord> {
        self.registry.require(model)?;
        let backend = self
            .backends
            .get_mut(model)
            .ok_or_else(|| anyhow!("no backend attached for model '{}'", model))?;
        let prediction = backend.classify(&frame.pixels, frame.width, frame.height)?;
        log::debug!(
            "{} predicted {} ({:.2})",
            model,
            prediction.label,
            prediction.confidence
        );
        Ok(prediction.into_record())
    }

    /// Classify `image` and attach disposal category, message and guidelines.
    pub fn classify_image(&mut self, image: &[u8], model: &str) -> Result<PredictionRecord> {
        let mut record = self.predict_image(image, model)?;
        self.taxonomy.enrich(&mut record);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::registry::{ModelSpec, DEFAULT_MODEL};
    use crate::predict::FixedLabelClassifier;
    use serde_json::json;

    fn service() -> PredictionService {
        PredictionService::new(
            ModelRegistry::default(),
            WasteTaxonomy::reference().clone(),
        )
    }

    #[test]
    fn attach_requires_registered_model() {
        let mut svc = service();
        assert!(svc
            .attach("VGG", FixedLabelClassifier::new("paper"))
            .is_err());
        svc.attach(DEFAULT_MODEL, FixedLabelClassifier::new("paper"))
            .unwrap();
    }

    #[test]
    fn predict_frame_without_backend_fails() {
        let mut svc = service();
        let frame = RgbFrame::new(1, 1, vec![0, 0, 0]).unwrap();
        let err = svc.predict_frame(&frame, DEFAULT_MODEL).unwrap_err();
        assert!(err.to_string().contains("no backend attached"));
    }

    #[test]
    fn unavailable_model_is_rejected_before_decoding() {
        let mut registry = ModelRegistry::default();
        registry.register(
            "MobileNet",
            ModelSpec {
                weights: None,
                num_classes: 12,
            },
        );
        let mut svc = PredictionService::new(registry, WasteTaxonomy::reference().clone());
        let err = svc.predict_image(b"not an image", "MobileNet").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Model 'MobileNet' is not available or pretrained weights are missing."
        );
    }

    #[test]
    fn predict_frame_returns_raw_record() {
        let mut svc = service();
        svc.attach(DEFAULT_MODEL, FixedLabelClassifier::new("clothes"))
            .unwrap();
        let frame = RgbFrame::new(2, 1, vec![0; 6]).unwrap();
        let record = svc.predict_frame(&frame, DEFAULT_MODEL).unwrap();
        assert_eq!(record["prediction"], json!("clothes"));
        assert!(!record.contains_key("waste_category"));
    }
}
