use anyhow::{anyhow, Result};
use serde_json::Value;
use std::io::{BufRead, Write};

use super::taxonomy::WasteTaxonomy;

/// Record exchanged between the image classifier and the presentation layer.
pub type PredictionRecord = serde_json::Map<String, Value>;

pub const PREDICTION_FIELD: &str = "prediction";
pub const WASTE_CATEGORY_FIELD: &str = "waste_category";
pub const DISPOSAL_MESSAGE_FIELD: &str = "disposal_message";
pub const DISPOSAL_GUIDELINES_FIELD: &str = "disposal_guidelines";

impl WasteTaxonomy {
    /// Attach `waste_category`, `disposal_message` and `disposal_guidelines`
    /// derived from the record's `prediction`.
    ///
    /// A record without `prediction` is left untouched. Existing derived
    /// fields are overwritten; every other field passes through. A
    /// non-string `prediction` is used as its JSON text, so `null` reads
    /// "This item (null) ..." and resolves to `Unknown`.
    pub fn enrich<'a>(&self, record: &'a mut PredictionRecord) -> &'a mut PredictionRecord {
        let label = record.get(PREDICTION_FIELD).map(|value| match value {
            Value::String(label) => label.clone(),
            other => other.to_string(),
        });
        let Some(label) = label else {
            return record;
        };
        let advice = self.advise(&label);
        record.insert(
            WASTE_CATEGORY_FIELD.to_string(),
            Value::String(advice.waste_category.as_str().to_string()),
        );
        record.insert(
            DISPOSAL_MESSAGE_FIELD.to_string(),
            Value::String(advice.disposal_message),
        );
        record.insert(
            DISPOSAL_GUIDELINES_FIELD.to_string(),
            Value::String(advice.disposal_guidelines),
        );
        record
    }

    /// Enrich an arbitrary JSON value. Anything other than an object is rejected.
    pub fn enrich_value(&self, value: Value) -> Result<Value> {
        match value {
            Value::Object(mut record) => {
                self.enrich(&mut record);
                Ok(Value::Object(record))
            }
            other => Err(anyhow!(
                "prediction record must be a JSON object, got {}",
                json_kind(&other)
            )),
        }
    }
}

/// Enrich one JSON object per input line and write each result as a line.
///
/// Blank lines are skipped. The first malformed or non-object line aborts
/// with its 1-based line number. Returns the number of records written.
pub fn enrich_lines<R, W>(
    reader: R,
    taxonomy: &WasteTaxonomy,
    out: &mut W,
    pretty: bool,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut count = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| anyhow!("line {}: read failed: {}", line_no, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(&line)
            .map_err(|e| anyhow!("line {}: invalid JSON: {}", line_no, e))?;
        let enriched = taxonomy
            .enrich_value(value)
            .map_err(|e| anyhow!("line {}: {}", line_no, e))?;
        write_json_line(out, &enriched, pretty)?;
        count += 1;
    }
    Ok(count)
}

pub fn write_json_line<W: Write>(out: &mut W, value: &Value, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Enrich a record against the reference taxonomy.
pub fn enrich(mut record: PredictionRecord) -> PredictionRecord {
    WasteTaxonomy::reference().enrich(&mut record);
    record
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    fn record(value: Value) -> PredictionRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn extra_fields_pass_through() {
        let out = enrich(record(json!({"prediction": "trash", "confidence": 0.91})));
        assert_eq!(out["confidence"], json!(0.91));
        assert_eq!(out[WASTE_CATEGORY_FIELD], json!("Landfill Waste"));
    }

    #[test]
    fn enrich_returns_same_record() {
        let mut input = record(json!({"prediction": "paper"}));
        let taxonomy = WasteTaxonomy::reference();
        let returned: *const PredictionRecord = taxonomy.enrich(&mut input);
        assert!(std::ptr::eq(returned, &input));
        assert_eq!(input.len(), 4);
    }

    #[test]
    fn non_string_prediction_resolves_unknown() {
        let out = enrich(record(json!({"prediction": 42})));
        assert_eq!(out[WASTE_CATEGORY_FIELD], json!("Unknown"));
        assert_eq!(
            out[DISPOSAL_MESSAGE_FIELD],
            json!("This item (42) should be disposed of in the Unknown bin.")
        );
    }

    #[test]
    fn enrich_value_rejects_non_objects() {
        let taxonomy = WasteTaxonomy::reference();
        let err = taxonomy.enrich_value(json!(["plastic"])).unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(taxonomy.enrich_value(json!("plastic")).is_err());

        let ok = taxonomy.enrich_value(json!({"prediction": "metal"})).unwrap();
        assert_eq!(ok[WASTE_CATEGORY_FIELD], json!("Recyclables"));
    }

    #[test]
    fn null_prediction_uses_json_text() {
        let out = enrich(record(json!({"prediction": null})));
        assert_eq!(
            out[DISPOSAL_MESSAGE_FIELD],
            json!("This item (null) should be disposed of in the Unknown bin.")
        );
    }

    #[test]
    fn enriched_keys_follow_insertion_order() {
        let out = enrich(record(json!({"prediction": "paper", "confidence": 0.5})));
        let keys: Vec<&str> = out.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "prediction",
                "confidence",
                WASTE_CATEGORY_FIELD,
                DISPOSAL_MESSAGE_FIELD,
                DISPOSAL_GUIDELINES_FIELD,
            ]
        );
    }

    #[test]
    fn enrich_lines_skips_blank_lines() {
        let input = "{\"prediction\": \"trash\"}\n\n   \n{\"prediction\": \"shoes\"}\n";
        let mut out = Vec::new();
        let count =
            enrich_lines(Cursor::new(input), WasteTaxonomy::reference(), &mut out, false).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][WASTE_CATEGORY_FIELD], json!("Landfill Waste"));
        assert_eq!(lines[1][WASTE_CATEGORY_FIELD], json!("Special Disposal"));
    }

    #[test]
    fn enrich_lines_rejects_non_object_with_line_number() {
        let input = "{\"prediction\": \"metal\"}\n\n[1]\n{\"prediction\": \"paper\"}\n";
        let mut out = Vec::new();
        let err = enrich_lines(Cursor::new(input), WasteTaxonomy::reference(), &mut out, false)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("line 3:"), "{}", err);
        assert!(err.contains("an array"), "{}", err);

        // Records before the bad line were already written; nothing after it.
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Recyclables"));
    }

    #[test]
    fn enrich_lines_aborts_on_malformed_json() {
        let input = "{\"prediction\": \"battery\"}\n{\"prediction\": \n{\"prediction\": \"paper\"}\n";
        let mut out = Vec::new();
        let err = enrich_lines(Cursor::new(input), WasteTaxonomy::reference(), &mut out, false)
            .unwrap_err()
            .to_string();
        assert!(err.starts_with("line 2: invalid JSON"), "{}", err);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }
}
