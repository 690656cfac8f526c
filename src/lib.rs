//! Smartbin waste classification core
//!
//! Turns an image classifier's raw label into something a bin user can act on.
//!
//! # Flow
//!
//! 1. An uploaded photo is decoded and run through the classifier registered
//!    for the requested model (`predict`).
//! 2. The classifier yields a record such as `{"prediction": "cardboard"}`.
//! 3. The record is enriched in place with `waste_category`,
//!    `disposal_message` and `disposal_guidelines` (`waste`).
//!
//! # Module Structure
//!
//! - `waste`: category resolution, guideline table, record enrichment
//! - `predict`: model registry, classifier backends, image decoding
//! - `config`: TOML file + environment configuration

pub mod config;
pub mod predict;
pub mod waste;

pub use config::SmartbinConfig;
pub use predict::{
    decode_rgb, FixedLabelClassifier, ImageClassifier, ModelRegistry, ModelSpec, Prediction,
    PredictionService, RgbFrame,
};
pub use waste::{
    enrich, resolve_category, ClassificationTable, DisposalAdvice, GuidelineTable,
    PredictionRecord, WasteCategory, WasteTaxonomy,
};
