//! Waste disposal classification.
//!
//! A predicted label (e.g. `"cardboard"`) resolves to one of five disposal
//! categories or `Unknown`; each category carries a guideline string. The
//! enricher writes both, plus a disposal message, back into the prediction
//! record handed to the presentation layer.

mod category;
mod enrich;
mod guidelines;
mod table;
mod taxonomy;

pub use category::WasteCategory;
pub use enrich::{
    enrich, enrich_lines, write_json_line, PredictionRecord, DISPOSAL_GUIDELINES_FIELD,
    DISPOSAL_MESSAGE_FIELD, PREDICTION_FIELD, WASTE_CATEGORY_FIELD,
};
pub use guidelines::GuidelineTable;
pub use table::{resolve_category, ClassificationTable};
pub use taxonomy::{DisposalAdvice, WasteTaxonomy};
