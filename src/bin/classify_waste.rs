//! classify_waste - attach disposal advice to classifier predictions
//!
//! Reads prediction records (one JSON object per line) or bare labels and
//! prints each record with `waste_category`, `disposal_message` and
//! `disposal_guidelines` filled in.

use anyhow::{anyhow, Result};
use clap::Parser;
use serde_json::Value;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use smartbin::waste::{enrich_lines, write_json_line, PREDICTION_FIELD};
use smartbin::{PredictionRecord, SmartbinConfig, WasteTaxonomy};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long, env = "SMARTBIN_CONFIG")]
    config: Option<PathBuf>,
    /// Predicted label to classify (repeatable).
    #[arg(long = "label", value_name = "LABEL")]
    labels: Vec<String>,
    /// JSON-lines file of prediction records, or `-` for stdin.
    #[arg(long)]
    input: Option<String>,
    /// Pretty-print each output record.
    #[arg(long)]
    pretty: bool,
    /// Print the classification and guideline tables, then exit.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = SmartbinConfig::load_from(args.config.as_deref())?;
    log::debug!("default model: {}", cfg.default_model);
    let taxonomy = &cfg.taxonomy;

    if args.check {
        print_tables(taxonomy);
        return Ok(());
    }
    if args.labels.is_empty() && args.input.is_none() {
        return Err(anyhow!("nothing to classify: pass --label or --input"));
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut count = 0usize;

    for label in &args.labels {
        let mut record = PredictionRecord::new();
        record.insert(PREDICTION_FIELD.to_string(), Value::String(label.clone()));
        taxonomy.enrich(&mut record);
        write_json_line(&mut out, &Value::Object(record), args.pretty)?;
        count += 1;
    }

    if let Some(input) = &args.input {
        let reader: Box<dyn BufRead> = if input == "-" {
            Box::new(BufReader::new(std::io::stdin()))
        } else {
            let file = std::fs::File::open(input)
                .map_err(|e| anyhow!("failed to open input {}: {}", input, e))?;
            Box::new(BufReader::new(file))
        };
        count += enrich_lines(reader, taxonomy, &mut out, args.pretty)?;
    }

    log::info!("classified {} record(s)", count);
    Ok(())
}

fn print_tables(taxonomy: &WasteTaxonomy) {
    for (category, labels) in taxonomy.classification().groups() {
        println!("{}: {}", category, labels.join(", "));
    }
    println!();
    let mut categories = taxonomy.classification().categories();
    categories.push(smartbin::WasteCategory::Unknown);
    for category in categories {
        println!(
            "{} -> {}",
            category,
            taxonomy.guidelines().guideline_for(category)
        );
    }
}
