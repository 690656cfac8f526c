use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

pub const DEFAULT_MODEL: &str = "AlexNet";
pub const DEFAULT_WEIGHTS_PATH: &str = "./weights/AlexNet_model_92.04%.pth";
/// Label count of the bundled garbage classifier.
pub const DEFAULT_NUM_CLASSES: usize = 12;

/// A known model and where its pretrained weights live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    pub weights: Option<PathBuf>,
    pub num_classes: usize,
}

impl ModelSpec {
    pub fn new(weights: impl Into<PathBuf>, num_classes: usize) -> Self {
        Self {
            weights: Some(weights.into()),
            num_classes,
        }
    }
}

/// Model name -> spec. Names are matched exactly.
#[derive(Clone, Debug)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelSpec>,
}

impl ModelRegistry {
    pub fn empty() -> Self {
        Self {
            models: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: impl Into<String>, spec: ModelSpec) {
        self.models.insert(name.into(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        self.models.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ModelSpec> {
        self.models.get_mut(name)
    }

    /// True when `name` is registered and has a weights path.
    pub fn is_model_available(&self, name: &str) -> bool {
        self.models
            .get(name)
            .is_some_and(|spec| spec.weights.is_some())
    }

    /// Spec for an available model, or the error shown to the uploader.
    pub fn require(&self, name: &str) -> Result<&ModelSpec> {
        match self.models.get(name) {
            Some(spec) if spec.weights.is_some() => Ok(spec),
            _ => Err(anyhow!(
                "Model '{}' is not available or pretrained weights are missing.",
                name
            )),
        }
    }

    /// Registered model names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(
            DEFAULT_MODEL,
            ModelSpec::new(DEFAULT_WEIGHTS_PATH, DEFAULT_NUM_CLASSES),
        );
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_offers_alexnet() {
        let registry = ModelRegistry::default();
        assert!(registry.is_model_available("AlexNet"));
        assert!(!registry.is_model_available("alexnet"));
        assert_eq!(registry.list(), vec!["AlexNet".to_string()]);
        assert_eq!(registry.require("AlexNet").unwrap().num_classes, 12);
    }

    #[test]
    fn model_without_weights_is_unavailable() {
        let mut registry = ModelRegistry::empty();
        registry.register(
            "ResNet",
            ModelSpec {
                weights: None,
                num_classes: 12,
            },
        );
        assert!(!registry.is_model_available("ResNet"));
        let err = registry.require("ResNet").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Model 'ResNet' is not available or pretrained weights are missing."
        );
    }
}
