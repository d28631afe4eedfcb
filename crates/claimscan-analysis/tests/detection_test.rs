//! Scenario tests for the grouped detector.

mod common;

use claimscan_analysis::outliers::{AnomalyMethod, Evidence};
use claimscan_analysis::GroupedAnomalyDetector;
use claimscan_core::config::DetectionConfig;
use claimscan_core::Value;

use common::{billing_table, row, spiked_group};

fn detector() -> GroupedAnomalyDetector {
    GroupedAnomalyDetector::from_config(&DetectionConfig::default())
}

#[test]
fn forty_records_one_spike_flags_by_both_methods() {
    let table = billing_table(spiked_group("99213", 40, 100.0, 1000.0, 17));
    let d = detector().detect(&table).unwrap();

    assert_eq!(d.iqr.len(), 1);
    let rec = &d.iqr.records[0];
    assert_eq!(rec.row, 17);
    assert_eq!(rec.method, AnomalyMethod::Iqr);
    assert_eq!(rec.metric, "avg_mdcr_pymt_amt");
    assert_eq!(rec.metric_label, "Payment Amount");
    assert_eq!(rec.group_key, "hcpcs_cd");
    assert_eq!(rec.group_value, "99213");
    assert_eq!(rec.group_label.as_deref(), Some("service 99213"));
    assert_eq!(rec.group_size, 40);
    assert_eq!(rec.reason, "avg_mdcr_pymt_amt > HCPCS-specific IQR upper bound");
    let bounds = rec.iqr_bounds().unwrap();
    assert_eq!(bounds.upper, 100.0);
    assert_eq!(bounds.iqr, 0.0);

    assert_eq!(d.zscore.len(), 1);
    let z = &d.zscore.records[0];
    assert_eq!(z.row, 17);
    assert_eq!(
        z.reason,
        "avg_mdcr_pymt_amt Z-score > 3.5 within HCPCS group"
    );
    match z.evidence {
        Evidence::ZScore { score, threshold } => {
            assert!((score - 39f64.sqrt()).abs() < 1e-9);
            assert_eq!(threshold, 3.5);
        }
        Evidence::Iqr(_) => panic!("z-score record carries IQR evidence"),
    }
}

#[test]
fn twenty_nine_records_never_flag() {
    let table = billing_table(spiked_group("99213", 29, 100.0, 1.0e9, 0));
    let d = detector().detect(&table).unwrap();
    assert!(d.iqr.is_empty());
    assert!(d.zscore.is_empty());
    assert_eq!(d.groups_eligible, 0);
    assert_eq!(d.groups_skipped, 1);
    assert!(d.stats.is_empty());
}

#[test]
fn unparsable_and_blank_metrics_are_excluded_but_retained() {
    let mut rows = spiked_group("J1234", 40, 100.0, 1000.0, 0);
    rows[5].1 = Value::from("N/A");
    rows[6].1 = Value::Missing;
    let table = billing_table(rows);

    let d = detector().detect(&table).unwrap();
    let stats = d.stats_for("J1234", "avg_mdcr_pymt_amt").unwrap();
    assert_eq!(stats.group_size, 40);
    assert_eq!(stats.n_values, 38);

    for rec in d.iqr.iter().chain(d.zscore.iter()) {
        assert!(rec.row != 5 && rec.row != 6);
    }
    assert_eq!(d.iqr.records[0].row, 0);
    // the source table is untouched
    assert_eq!(table.get(5, "avg_mdcr_pymt_amt"), &Value::from("N/A"));
}

#[test]
fn bounds_distinguish_not_computable_from_nothing_exceeded() {
    // 30 rows, only 10 numeric payments: IQR computable, Z-score not
    let mut rows: Vec<_> = (0..30).map(|_| row("A", Value::Missing, 2.0)).collect();
    for (i, r) in rows.iter_mut().take(10).enumerate() {
        r.1 = Value::from(if i == 3 { 1000.0 } else { 100.0 });
    }
    let d = detector().detect(&billing_table(rows)).unwrap();

    let pay = d.stats_for("A", "avg_mdcr_pymt_amt").unwrap();
    assert_eq!(pay.n_values, 10);
    assert!(pay.iqr.is_some());
    assert!(pay.zscore.is_none());
    assert_eq!(pay.iqr_flagged, 1);

    // constant ratio: fences computed with nothing above them, no scores
    let ratio = d.stats_for("A", "submitted_to_payment_ratio").unwrap();
    assert!(ratio.iqr.is_some());
    assert!(ratio.zscore.is_none(), "zero variance has no scores");
    assert_eq!(ratio.iqr_flagged, 0);
}

#[test]
fn seven_values_leave_iqr_undefined() {
    let mut rows: Vec<_> = (0..30).map(|_| row("A", Value::Missing, Value::Missing)).collect();
    for (i, r) in rows.iter_mut().take(7).enumerate() {
        r.1 = Value::from(if i == 0 { 1.0e6 } else { 1.0 });
    }
    let d = detector().detect(&billing_table(rows)).unwrap();
    let pay = d.stats_for("A", "avg_mdcr_pymt_amt").unwrap();
    assert!(pay.iqr.is_none());
    assert!(d.iqr.is_empty());
}

#[test]
fn infinite_values_never_flag_and_do_not_poison_stats() {
    let mut rows = spiked_group("A", 40, 100.0, 1000.0, 0);
    rows[1].2 = Value::from(f64::INFINITY);
    let d = detector().detect(&billing_table(rows)).unwrap();

    let ratio = d.stats_for("A", "submitted_to_payment_ratio").unwrap();
    assert_eq!(ratio.n_values, 39);
    assert!(d
        .iqr
        .iter()
        .chain(d.zscore.iter())
        .all(|r| r.metric != "submitted_to_payment_ratio"));
}

#[test]
fn detection_never_crosses_group_boundaries() {
    // B's normal payment is A's spike; each group is judged on its own
    let mut rows = spiked_group("A", 40, 100.0, 1000.0, 0);
    rows.extend(spiked_group("B", 40, 1000.0, 1000.0, 0));
    let d = detector().detect(&billing_table(rows)).unwrap();

    assert!(d.iqr.iter().all(|r| r.group_value == "A"));
    assert_eq!(d.stats_for("B", "avg_mdcr_pymt_amt").unwrap().iqr_flagged, 0);
    assert_eq!(d.groups_total, 2);
}

#[test]
fn metric_order_follows_configuration_within_a_group() {
    let rows: Vec<_> = (0..40)
        .map(|i| {
            let pay = if i == 2 { 1000.0 } else { 100.0 };
            let ratio = if i == 9 { 50.0 } else { 2.0 };
            row("A", pay, ratio)
        })
        .collect();
    let d = detector().detect(&billing_table(rows)).unwrap();
    let metrics: Vec<&str> = d.iqr.iter().map(|r| r.metric.as_str()).collect();
    assert_eq!(metrics, vec!["avg_mdcr_pymt_amt", "submitted_to_payment_ratio"]);
    assert_eq!(
        d.iqr.records[1].reason,
        "submitted_to_payment_ratio > HCPCS-specific IQR upper bound"
    );
}

#[test]
fn overlapping_sets_are_not_deduplicated() {
    let table = billing_table(spiked_group("A", 40, 100.0, 1000.0, 3));
    let d = detector().detect(&table).unwrap();
    assert_eq!(d.iqr.records[0].row, d.zscore.records[0].row);
}

#[test]
fn identifying_columns_are_carried_when_present() {
    let table = billing_table(spiked_group("A", 40, 100.0, 1000.0, 3));
    let d = detector().detect(&table).unwrap();
    assert_eq!(
        d.iqr.attribute_columns,
        vec![
            "hcpcs_cd",
            "hcpcs_desc",
            "rndrng_npi",
            "avg_mdcr_pymt_amt",
            "submitted_to_payment_ratio"
        ]
    );
    let rec = &d.iqr.records[0];
    assert_eq!(d.iqr.attribute(rec, "rndrng_npi"), Some(&Value::from("1000003")));
}
