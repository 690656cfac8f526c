//! Image prediction service.
//!
//! Uploaded photos are decoded to RGB, handed to the classifier registered for
//! the requested model, and the resulting record is enriched with disposal
//! advice. Loading model weights is the backend's concern; the registry only
//! tracks which models exist and whether their weights are configured.

mod backend;
mod frame;
mod registry;
mod service;
mod stub;

pub use backend::{ImageClassifier, Prediction};
pub use frame::{decode_rgb, RgbFrame};
pub use registry::{
    ModelRegistry, ModelSpec, DEFAULT_MODEL, DEFAULT_NUM_CLASSES, DEFAULT_WEIGHTS_PATH,
};
pub use service::PredictionService;
pub use stub::FixedLabelClassifier;
