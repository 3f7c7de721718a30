//! CSV ingestion adapter: header normalization and row cleaning.
//!
//! Real-world ledger exports name their columns inconsistently. The
//! adapter maps whatever headers arrive onto the engine's canonical
//! schema, scrubs amounts, backfills timestamps and transaction ids, and
//! drops rows the engine would reject.

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use amlscope_core::{Ledger, TransactionRecord};

/// Canonical ledger columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Sender,
    Receiver,
    Amount,
    Timestamp,
    TransactionId,
}

/// Map a raw header onto a canonical column, first match wins.
fn canonical_column(header: &str) -> Option<Column> {
    let name = header.trim().to_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| name.contains(p));

    if matches(&["sender", "source", "from", "origin", "payer"]) {
        Some(Column::Sender)
    } else if matches(&["receiver", "target", "to", "dest", "beneficiary", "payee"]) {
        Some(Column::Receiver)
    } else if matches(&["amount", "value", "amt", "total", "price"]) {
        Some(Column::Amount)
    } else if matches(&["time", "date", "created"]) {
        Some(Column::Timestamp)
    } else if matches(&["id", "txid", "reference", "hash"]) {
        Some(Column::TransactionId)
    } else {
        None
    }
}

/// Strip everything but digits, dots, and signs from an amount cell.
fn scrub_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// Parse a timestamp cell, falling back through common layouts; `None`
/// means the caller substitutes the current wall clock.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return parsed
            .and_hms_opt(0, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt));
    }
    // Unix epoch seconds show up in some exports.
    if let Ok(seconds) = raw.parse::<i64>() {
        return Utc.timestamp_opt(seconds, 0).single();
    }
    None
}

/// Read and clean a ledger CSV.
///
/// Fails when the file cannot be read or when no column maps onto one of
/// the required logical columns (sender, receiver, amount). Rows with
/// empty account ids or non-positive amounts are dropped with a warning,
/// mirroring what the engine's precondition contract demands.
pub fn read_ledger(path: &Path) -> Result<Ledger> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open ledger {}", path.display()))?;

    let headers = reader
        .headers()
        .context("failed to read CSV headers")?
        .clone();

    let mut columns: Vec<Option<Column>> = vec![None; headers.len()];
    let mut assigned = [false; 5];
    for (index, header) in headers.iter().enumerate() {
        if let Some(column) = canonical_column(header) {
            let slot = column as usize;
            if !assigned[slot] {
                assigned[slot] = true;
                columns[index] = Some(column);
            }
        }
    }

    let mut missing = Vec::new();
    for (column, name) in [
        (Column::Sender, "sender_id"),
        (Column::Receiver, "receiver_id"),
        (Column::Amount, "amount"),
    ] {
        if !assigned[column as usize] {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        bail!(
            "ledger CSV is missing logical columns for: {}",
            missing.join(", ")
        );
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_index, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to read CSV row {row_index}"))?;

        let cell = |wanted: Column| -> Option<&str> {
            columns
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|i| row.get(i))
        };

        let sender = cell(Column::Sender).unwrap_or("").trim().to_string();
        let receiver = cell(Column::Receiver).unwrap_or("").trim().to_string();
        if sender.is_empty() || receiver.is_empty() {
            dropped += 1;
            continue;
        }

        let amount = cell(Column::Amount).and_then(scrub_amount);
        let amount = match amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => {
                dropped += 1;
                continue;
            }
        };

        let timestamp = cell(Column::Timestamp)
            .and_then(parse_timestamp)
            .unwrap_or_else(Utc::now);

        let transaction_id = cell(Column::TransactionId)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("GEN_TX_{row_index}"));

        records.push(TransactionRecord::new(
            transaction_id,
            sender,
            receiver,
            amount,
            timestamp,
        ));
    }

    if dropped > 0 {
        warn!(dropped, "dropped rows violating the ledger contract");
    }

    Ok(Ledger::new(records))
}
