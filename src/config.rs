use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::predict::{ModelRegistry, ModelSpec, DEFAULT_MODEL, DEFAULT_NUM_CLASSES};
use crate::waste::{ClassificationTable, GuidelineTable, WasteCategory, WasteTaxonomy};

pub const CONFIG_ENV: &str = "SMARTBIN_CONFIG";
pub const DEFAULT_MODEL_ENV: &str = "SMARTBIN_DEFAULT_MODEL";
pub const MODEL_WEIGHTS_ENV: &str = "SMARTBIN_MODEL_WEIGHTS";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SmartbinConfigFile {
    default_model: Option<String>,
    models: Option<BTreeMap<String, ModelConfigFile>>,
    /// Extra labels per category, appended to the reference groups.
    classification: Option<BTreeMap<String, Vec<String>>>,
    /// Replacement guideline text per category.
    guidelines: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ModelConfigFile {
    weights: Option<PathBuf>,
    num_classes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SmartbinConfig {
    pub default_model: String,
    pub models: ModelRegistry,
    pub taxonomy: WasteTaxonomy,
}

impl SmartbinConfig {
    /// Load from the file named by `SMARTBIN_CONFIG` (if any), then apply
    /// environment overrides and validate.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty());
        Self::load_from(config_path.as_deref().map(Path::new))
    }

    /// Like [`SmartbinConfig::load`] with an explicit file path.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => Some(read_config_file(path)?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default())?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SmartbinConfigFile) -> Result<Self> {
        let default_model = file
            .default_model
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let mut models = ModelRegistry::default();
        for (name, model) in file.models.unwrap_or_default() {
            let mut spec = models.get(&name).cloned().unwrap_or(ModelSpec {
                weights: None,
                num_classes: DEFAULT_NUM_CLASSES,
            });
            if let Some(weights) = model.weights {
                spec.weights = Some(weights);
            }
            if let Some(num_classes) = model.num_classes {
                spec.num_classes = num_classes;
            }
            models.register(name, spec);
        }

        let mut extra = Vec::new();
        for (name, labels) in file.classification.unwrap_or_default() {
            let category = parse_category(&name, "classification")?;
            extra.push((category, labels));
        }
        // Keep declaration order stable regardless of map ordering.
        extra.sort_by_key(|(category, _)| *category);
        let classification = ClassificationTable::reference().extended(extra)?;

        let mut guidelines = GuidelineTable::reference().clone();
        for (name, text) in file.guidelines.unwrap_or_default() {
            let category = parse_category(&name, "guidelines")?;
            guidelines.set(category, text);
        }

        Ok(Self {
            default_model,
            models,
            taxonomy: WasteTaxonomy::new(classification, guidelines),
        })
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(model) = std::env::var(DEFAULT_MODEL_ENV) {
            if !model.trim().is_empty() {
                self.default_model = model.trim().to_string();
            }
        }
        if let Ok(weights) = std::env::var(MODEL_WEIGHTS_ENV) {
            if !weights.trim().is_empty() {
                let weights = PathBuf::from(weights);
                match self.models.get_mut(&self.default_model) {
                    Some(spec) => spec.weights = Some(weights),
                    None => self.models.register(
                        self.default_model.clone(),
                        ModelSpec::new(weights, DEFAULT_NUM_CLASSES),
                    ),
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.models.get(&self.default_model).is_none() {
            return Err(anyhow!(
                "default model '{}' is not configured",
                self.default_model
            ));
        }
        for name in self.models.list() {
            if self.models.get(&name).is_some_and(|spec| spec.num_classes == 0) {
                return Err(anyhow!("model '{}' must declare at least one class", name));
            }
        }
        self.taxonomy.check_consistency()?;
        Ok(())
    }
}

fn parse_category(name: &str, section: &str) -> Result<WasteCategory> {
    name.parse()
        .map_err(|_| anyhow!("[{}] names unknown waste category '{}'", section, name))
}

fn read_config_file(path: &Path) -> Result<SmartbinConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = toml::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
