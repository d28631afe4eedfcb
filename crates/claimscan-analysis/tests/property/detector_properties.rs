use claimscan_analysis::outliers::Evidence;
use claimscan_analysis::rollup::Rollup;
use claimscan_analysis::GroupedAnomalyDetector;
use claimscan_core::config::DetectionConfig;
use claimscan_core::{DataError, RecordTable, Value};
use proptest::prelude::*;

const CODES: &[&str] = &["99213", "99214", "J1234", "G0008"];

fn table(rows: &[(usize, f64, f64)]) -> RecordTable {
    let columns = ["hcpcs_cd", "hcpcs_desc", "avg_mdcr_pymt_amt", "submitted_to_payment_ratio"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let data = rows
        .iter()
        .map(|&(g, pay, ratio)| {
            vec![
                Value::from(CODES[g]),
                Value::from(format!("service {}", CODES[g])),
                Value::from(pay),
                Value::from(ratio),
            ]
        })
        .collect();
    RecordTable::from_rows(columns, data).unwrap()
}

fn rows_strategy() -> impl Strategy<Value = Vec<(usize, f64, f64)>> {
    prop::collection::vec((0usize..CODES.len(), 0.0f64..10_000.0, 0.5f64..20.0), 1..160)
}

#[test]
fn empty_table_is_rejected() {
    let err = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
        .detect(&table(&[]))
        .unwrap_err();
    assert!(matches!(err, DataError::EmptyInput { .. }));
}

proptest! {
    #[test]
    fn iqr_records_exceed_their_upper_fence(rows in rows_strategy()) {
        let d = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
            .detect(&table(&rows))
            .unwrap();
        for rec in d.iqr.iter() {
            let bounds = rec.iqr_bounds().unwrap();
            prop_assert!(rec.metric_value > bounds.upper);
        }
    }

    #[test]
    fn zscore_records_exceed_the_threshold(rows in rows_strategy()) {
        let d = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
            .detect(&table(&rows))
            .unwrap();
        for rec in d.zscore.iter() {
            match rec.evidence {
                Evidence::ZScore { score, threshold } => prop_assert!(score > threshold),
                Evidence::Iqr(_) => prop_assert!(false, "wrong evidence"),
            }
        }
    }

    #[test]
    fn small_groups_are_never_flagged(rows in rows_strategy()) {
        let d = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
            .detect(&table(&rows))
            .unwrap();
        for rec in d.iqr.iter().chain(d.zscore.iter()) {
            let size = rows.iter().filter(|r| CODES[r.0] == rec.group_value).count();
            prop_assert!(size >= 30);
            prop_assert_eq!(rec.group_size, size);
        }
    }

    #[test]
    fn values_descend_within_group_and_metric(rows in rows_strategy()) {
        let d = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
            .detect(&table(&rows))
            .unwrap();
        for set in [&d.iqr, &d.zscore] {
            for pair in set.records.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a.group_value == b.group_value && a.metric == b.metric {
                    prop_assert!(a.metric_value >= b.metric_value);
                }
            }
        }
    }

    #[test]
    fn rollup_counts_sum_to_flagged_rows(rows in rows_strategy()) {
        let d = GroupedAnomalyDetector::from_config(&DetectionConfig::default())
            .detect(&table(&rows))
            .unwrap();
        let rollup = Rollup::build(&d.iqr, 20);
        // four codes and two metrics stay under the cap
        prop_assert!(rollup.distinct_keys <= 8);
        prop_assert_eq!(rollup.covered_rows(), d.iqr.len());
        for pair in rollup.entries.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }
    }
}
