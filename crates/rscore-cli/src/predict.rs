//! # Predict Subcommand
//!
//! Scores requests given either as flags or as a JSON payload file. A
//! payload holding a JSON array is scored as a batch and answered with an
//! array of responses in the same order.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;

use rscore_core::{AreaType, Pincode, PredictionRequest, ShopSize};
use rscore_scoring::{PredictionOutcome, ScoringContext};

use crate::{write_json, EXIT_NOT_FOUND, EXIT_OK};

/// Arguments for `rscore predict`.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON request file (object or array). `-` reads standard input.
    #[arg(long, value_name = "FILE", conflicts_with_all = [
        "pincode", "area_type", "competitors", "employee_count",
        "stock_availability", "shoe_size",
    ])]
    pub payload: Option<PathBuf>,

    /// Postal code of the candidate location.
    #[arg(long, required_unless_present = "payload")]
    pub pincode: Option<Pincode>,

    /// Area label: Urban, Semi-Urban or Rural.
    #[arg(long, required_unless_present = "payload")]
    pub area_type: Option<String>,

    /// Number of competing stores nearby.
    #[arg(long, required_unless_present = "payload")]
    pub competitors: Option<u32>,

    #[arg(long, required_unless_present = "payload")]
    pub employee_count: Option<u32>,

    #[arg(long, required_unless_present = "payload")]
    pub stock_availability: Option<f64>,

    /// Shop size label (Small, Medium, Large) or a number.
    #[arg(long, required_unless_present = "payload")]
    pub shoe_size: Option<String>,
}

/// Requests read from the command line.
#[derive(Debug, PartialEq)]
pub enum Requests {
    Single(PredictionRequest),
    Batch(Vec<PredictionRequest>),
}

impl PredictArgs {
    /// Build the request set from the payload file or from the flags.
    pub fn requests(&self) -> Result<Requests> {
        if let Some(path) = &self.payload {
            let text = read_payload(path)?;
            return parse_payload(&text)
                .with_context(|| format!("invalid prediction payload: {}", path.display()));
        }
        match (
            self.pincode,
            &self.area_type,
            self.competitors,
            self.employee_count,
            self.stock_availability,
            &self.shoe_size,
        ) {
            (
                Some(pincode),
                Some(area_type),
                Some(competitors),
                Some(employee_count),
                Some(stock_availability),
                Some(shoe_size),
            ) => Ok(Requests::Single(PredictionRequest {
                pincode,
                area_type: AreaType::from_label(area_type),
                competitors,
                employee_count,
                stock_availability,
                shop_size: parse_shop_size(shoe_size),
            })),
            _ => bail!("either --payload or all request flags are required"),
        }
    }
}

/// Execute `rscore predict` against a bootstrapped context.
pub fn run_predict<W: Write>(
    args: &PredictArgs,
    context: &ScoringContext,
    out: &mut W,
) -> Result<u8> {
    match args.requests()? {
        Requests::Single(request) => {
            let outcome = context.predict(&request).context("prediction failed")?;
            let code = exit_code([&outcome]);
            write_json(out, &outcome.into_response())?;
            Ok(code)
        }
        Requests::Batch(requests) => {
            let outcomes = context
                .predict_batch(&requests)
                .into_iter()
                .enumerate()
                .map(|(i, r)| r.with_context(|| format!("prediction {i} failed")))
                .collect::<Result<Vec<_>>>()?;
            let code = exit_code(&outcomes);
            tracing::info!(
                requests = outcomes.len(),
                scored = outcomes.iter().filter(|o| o.is_scored()).count(),
                "batch scored"
            );
            let responses: Vec<_> = outcomes
                .into_iter()
                .map(PredictionOutcome::into_response)
                .collect();
            write_json(out, &responses)?;
            Ok(code)
        }
    }
}

/// Numeric text is a numeric shop size; anything else is a label.
pub fn parse_shop_size(raw: &str) -> ShopSize {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => ShopSize::Numeric(v),
        _ => ShopSize::Label(raw.to_string()),
    }
}

fn parse_payload(text: &str) -> Result<Requests> {
    let value: serde_json::Value = serde_json::from_str(text).context("not valid JSON")?;
    if value.is_array() {
        Ok(Requests::Batch(serde_json::from_value(value)?))
    } else {
        Ok(Requests::Single(serde_json::from_value(value)?))
    }
}

fn read_payload(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read payload from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read payload: {}", path.display()))
}

fn exit_code<'a>(outcomes: impl IntoIterator<Item = &'a PredictionOutcome>) -> u8 {
    if outcomes.into_iter().all(PredictionOutcome::is_scored) {
        EXIT_OK
    } else {
        EXIT_NOT_FOUND
    }
}
