//! Normalizing backend records into ledger nodes.
//!
//! Ledger-like records from different endpoints keep their parent reference
//! under different field names (`parentId`, `parentLedgerId`,
//! `underGroupId`, ...). The caller names the field.

use hoffstee_shared::types::LedgerId;
use serde_json::Value;

use super::error::HierarchyError;
use super::flatten::HierarchyBuilder;
use super::types::{HierarchyEntry, LedgerNode};

/// Reads `{id, name, <parent_column>}` out of each record.
///
/// A missing or `null` parent becomes `0` (root). A missing name becomes an
/// empty label.
///
/// # Errors
///
/// Returns `InvalidRecord` if a record is not an object, has no integer id,
/// or has a parent value that is not an integer.
pub fn convert_for_hierarchy(
    records: &[Value],
    parent_column: &str,
) -> Result<Vec<LedgerNode>, HierarchyError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| convert_record(index, record, parent_column))
        .collect()
}

fn convert_record(
    index: usize,
    record: &Value,
    parent_column: &str,
) -> Result<LedgerNode, HierarchyError> {
    let invalid = |reason: String| HierarchyError::InvalidRecord { index, reason };

    let object = record
        .as_object()
        .ok_or_else(|| invalid("record is not an object".to_string()))?;

    let id = object
        .get("id")
        .and_then(integer)
        .ok_or_else(|| invalid("missing integer `id`".to_string()))?;

    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let parent = match object.get(parent_column) {
        None | Some(Value::Null) => 0,
        Some(value) => integer(value)
            .ok_or_else(|| invalid(format!("`{parent_column}` is not an integer: {value}")))?,
    };

    Ok(LedgerNode {
        id: LedgerId(id),
        name,
        parent_id: Some(LedgerId(parent)),
    })
}

/// Integers arrive either as JSON numbers or as numeric strings.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Converts records with [`convert_for_hierarchy`] then flattens them.
///
/// # Errors
///
/// Any conversion or flattening error.
pub fn flatten_records(
    builder: &HierarchyBuilder,
    records: &[Value],
    parent_column: &str,
) -> Result<Vec<HierarchyEntry>, HierarchyError> {
    let nodes = convert_for_hierarchy(records, parent_column)?;
    builder.flatten(&nodes)
}
