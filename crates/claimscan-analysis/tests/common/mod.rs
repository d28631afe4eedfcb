#![allow(dead_code)]

use claimscan_core::{RecordTable, Value};

pub const COLUMNS: &[&str] = &[
    "hcpcs_cd",
    "hcpcs_desc",
    "rndrng_npi",
    "avg_mdcr_pymt_amt",
    "submitted_to_payment_ratio",
];

/// One billing row: service code, payment cell, ratio cell.
pub fn row(
    code: &str,
    payment: impl Into<Value>,
    ratio: impl Into<Value>,
) -> (String, Value, Value) {
    (code.to_string(), payment.into(), ratio.into())
}

/// Build a normalized table; `rndrng_npi` is the row index and the label
/// is derived from the code.
pub fn billing_table(rows: Vec<(String, Value, Value)>) -> RecordTable {
    let data = rows
        .into_iter()
        .enumerate()
        .map(|(i, (code, payment, ratio))| {
            vec![
                Value::from(code.as_str()),
                Value::from(format!("service {}", code)),
                Value::from(format!("{}", 1_000_000 + i)),
                payment,
                ratio,
            ]
        })
        .collect();
    RecordTable::from_rows(COLUMNS.iter().map(|c| c.to_string()).collect(), data)
        .expect("fixture rows match the header")
}

/// `n` rows of `code` paying `base`, with `spike` at row `spike_at`.
pub fn spiked_group(
    code: &str,
    n: usize,
    base: f64,
    spike: f64,
    spike_at: usize,
) -> Vec<(String, Value, Value)> {
    (0..n)
        .map(|i| {
            let pay = if i == spike_at { spike } else { base };
            row(code, pay, 2.0)
        })
        .collect()
}
