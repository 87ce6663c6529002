//! Hoffstee voucher checker
//!
//! Prints a ledger export as the indented dropdown list and, optionally,
//! runs a saved voucher form through validation.
//!
//! Usage: voucher-check [--parent-column <name>] <ledgers.json> [voucher.json]

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};

use hoffstee_core::hierarchy::{HierarchyBuilder, flatten_records};
use hoffstee_core::voucher::{SubmitAction, VoucherForm, VoucherPayload, validate_voucher};
use hoffstee_shared::{AppConfig, logging};

/// Prints a ledger export as the indented dropdown list and optionally
/// validates a voucher form.
#[derive(Parser, Debug)]
#[command(name = "voucher-check")]
#[command(about = "Checks ledger hierarchies and voucher files offline")]
struct Args {
    /// Field holding each record's parent id
    #[arg(long, default_value = "parentId")]
    parent_column: String,

    /// Ledger records: a JSON array or `{"data": [...]}`
    ledgers: PathBuf,

    /// Voucher form to validate
    voucher: Option<PathBuf>,
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    logging::init(&config.log);

    // Ledger list: a bare array or the API's `{ "data": [...] }` envelope
    let ledgers = match read_json(&args.ledgers)? {
        Value::Array(records) => records,
        Value::Object(mut body) => match body.remove("data") {
            Some(Value::Array(records)) => records,
            _ => bail!("{} has no ledger array", args.ledgers.display()),
        },
        _ => bail!("{} has no ledger array", args.ledgers.display()),
    };

    let builder = HierarchyBuilder::new(config.hierarchy.indent_marker);
    let entries = flatten_records(&builder, &ledgers, &args.parent_column)?;
    info!(
        records = ledgers.len(),
        listed = entries.len(),
        "ledger hierarchy built"
    );
    for entry in &entries {
        println!("{:>6}  {}", entry.id, entry.display_name);
    }

    let Some(path) = args.voucher else {
        return Ok(());
    };

    let form: VoucherForm = serde_json::from_value(read_json(&path)?)
        .with_context(|| format!("{} is not a voucher form", path.display()))?;

    match validate_voucher(&form) {
        Ok(totals) => {
            println!();
            println!("voucher {} is balanced at {}", form.voucher_number, totals.amount());
            let payload = VoucherPayload::new(form, SubmitAction::Save, &totals);
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(err) => {
            warn!(code = err.error_code(), "voucher failed validation");
            bail!("{err}")
        }
    }
}
