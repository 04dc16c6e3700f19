//! Property tests for the delta engine.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use rosterdelta_core::delta::{compute_delta, compute_delta_with_report, ChangeKind};
use rosterdelta_core::{DeltaConfig, OutputPolicy, Table};
use std::collections::{BTreeMap, HashSet};

const COLUMNS: &[&str] = &["id", "name", "city", "dept"];

type Cells = [Option<u8>; 3];

fn snapshot() -> impl Strategy<Value = BTreeMap<u8, Cells>> {
    prop::collection::btree_map(0u8..30, prop::array::uniform3(prop::option::of(0u8..3)), 0..15)
}

fn policy() -> impl Strategy<Value = OutputPolicy> {
    prop_oneof![Just(OutputPolicy::Simple), Just(OutputPolicy::Strict)]
}

fn key(k: u8) -> String {
    format!("{:03}", k)
}

fn to_table(rows: &BTreeMap<u8, Cells>) -> Table {
    Table::with_rows(
        COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|(k, cells)| {
                let mut values = vec![Some(key(*k))];
                values.extend(cells.iter().map(|c| c.map(|v| format!("v{}", v))));
                values
            })
            .collect(),
    )
    .unwrap()
}

fn config(policy: OutputPolicy) -> DeltaConfig {
    DeltaConfig::keyed_on("id")
        .with_exempt(["name"])
        .with_output_policy(policy)
}

fn output_keys(table: &Table) -> Vec<String> {
    (0..table.len())
        .map(|r| table.value(r, "id").unwrap().to_string())
        .collect()
}

proptest! {
    #[test]
    fn prop_output_keys_are_unique(prior in snapshot(), latest in snapshot(), policy in policy()) {
        let delta = compute_delta(&to_table(&prior), &to_table(&latest), &config(policy)).unwrap();
        let keys = output_keys(&delta);
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn prop_new_rows_are_complete(prior in snapshot(), latest in snapshot(), policy in policy()) {
        let latest_table = to_table(&latest);
        let delta = compute_delta(&to_table(&prior), &latest_table, &config(policy)).unwrap();

        for (row, k) in latest.keys().enumerate() {
            if prior.contains_key(k) {
                continue;
            }
            let hits: Vec<usize> = (0..delta.len())
                .filter(|r| delta.value(*r, "id") == Some(key(*k).as_str()))
                .collect();
            prop_assert_eq!(hits.len(), 1);
            prop_assert_eq!(&delta.rows()[hits[0]], &latest_table.rows()[row]);
        }
    }

    #[test]
    fn prop_every_changed_row_has_a_real_baseline_change(
        prior in snapshot(),
        latest in snapshot(),
        policy in policy()
    ) {
        let outcome =
            compute_delta_with_report(&to_table(&prior), &to_table(&latest), &config(policy)).unwrap();

        for entry in outcome.report.entries_of(ChangeKind::Changed) {
            let k: u8 = entry.key.parse().unwrap();
            let (before, after) = (&prior[&k], &latest[&k]);
            // compared columns are city (index 1) and dept (index 2)
            let really_changed = (1..3).any(|i| before[i].is_some() && before[i] != after[i]);
            prop_assert!(really_changed);
        }

        let matched_unchanged = latest
            .iter()
            .filter(|(k, after)| {
                prior
                    .get(*k)
                    .map(|before| !(1..3).any(|i| before[i].is_some() && before[i] != after[i]))
                    .unwrap_or(false)
            })
            .count();
        prop_assert_eq!(outcome.report.counts.unchanged, matched_unchanged);
    }

    #[test]
    fn prop_exempt_only_edits_never_emit(prior in snapshot(), names in prop::collection::vec(prop::option::of(0u8..3), 15)) {
        let mut latest = prior.clone();
        for (cells, name) in latest.values_mut().zip(names) {
            cells[0] = name;
        }

        let delta = compute_delta(&to_table(&prior), &to_table(&latest), &config(OutputPolicy::Strict)).unwrap();
        prop_assert!(delta.is_empty());
    }

    #[test]
    fn prop_rerun_against_itself_is_empty(prior in snapshot(), latest in snapshot(), policy in policy()) {
        let latest_table = to_table(&latest);
        compute_delta(&to_table(&prior), &latest_table, &config(policy)).unwrap();

        let rerun = compute_delta(&latest_table, &latest_table, &config(policy)).unwrap();
        prop_assert!(rerun.is_empty());
    }
}
