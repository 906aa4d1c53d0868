//! Reduce timing samples into ranked summary rows.
//!
//! For each entry we report the total, mean, population standard deviation
//! and variance of its samples, and its share of the largest total in the
//! same table. Rows are ranked by total time; equal totals keep the order in
//! which the names were first seen.

use super::stats::{StatsTable, TimingStats};
use crate::parser::schema::SummaryRow;
use crate::utils::config::MS_PER_SECOND;
use log::debug;
use std::cmp::Reverse;

/// Reduce a stats table to rows ranked by total time (descending)
///
/// **Public** - main entry point for statistics reduction
///
/// An empty table yields no rows. Entries without samples are kept with
/// zeroed average, standard deviation and variance.
pub fn reduce_table(table: &StatsTable) -> Vec<SummaryRow> {
    let max_total = table
        .iter()
        .map(|(_, stats)| stats.total_ms())
        .max()
        .filter(|&total| total > 0)
        .unwrap_or(1);

    let mut ranked: Vec<(u128, SummaryRow)> = table
        .iter()
        .map(|(name, stats)| (stats.total_ms(), summarize(name, stats, max_total)))
        .collect();

    // sort_by_key is stable, which preserves discovery order on ties
    ranked.sort_by_key(|(total, _)| Reverse(*total));

    debug!("Reduced {} entries, max total {}ms", ranked.len(), max_total);

    ranked.into_iter().map(|(_, row)| row).collect()
}

/// Build the summary row of one entry
///
/// **Private** - internal conversion
fn summarize(name: &str, stats: &TimingStats, max_total_ms: u128) -> SummaryRow {
    let total_ms = stats.total_ms();
    let distribution = Distribution::of(stats.samples());

    SummaryRow {
        name: name.to_string(),
        events: stats.count(),
        share: total_ms as f64 / max_total_ms as f64,
        total_secs: total_ms as f64 / MS_PER_SECOND,
        average_secs: distribution.mean / MS_PER_SECOND,
        std_dev_secs: distribution.std_dev() / MS_PER_SECOND,
        variance_secs2: distribution.variance / (MS_PER_SECOND * MS_PER_SECOND),
    }
}

/// Mean and population variance of a sample set, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Distribution {
    mean: f64,
    variance: f64,
}

impl Distribution {
    fn of(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let n = samples.len() as f64;
        let mean = samples.iter().map(|&x| x as f64).sum::<f64>() / n;
        let variance = samples
            .iter()
            .map(|&x| {
                let delta = x as f64 - mean;
                delta * delta
            })
            .sum::<f64>()
            / n;

        Self { mean, variance }
    }

    fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_ranking_and_share() {
        let mut table = StatsTable::new();
        table.record("read", 200);
        table.record("read", 300);
        table.record("write", 1500);

        let rows = reduce_table(&table);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "write");
        assert_eq!(rows[0].share, 1.0);
        assert_eq!(rows[1].name, "read");
        assert_eq!(rows[1].share, 1.0 / 3.0);
        assert_eq!(rows[1].events, 2);
        assert!(approx_eq(rows[1].total_secs, 0.5));
        assert!(approx_eq(rows[1].average_secs, 0.25));
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let mut table = StatsTable::new();
        table.record("b", 10);
        table.record("a", 10);
        table.record("c", 30);

        let names: Vec<String> = reduce_table(&table).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_population_std_dev() {
        let mut table = StatsTable::new();
        for ms in [2000, 4000, 4000, 4000, 5000, 5000, 7000, 9000] {
            table.record("f", ms);
        }

        let row = &reduce_table(&table)[0];
        assert!(approx_eq(row.average_secs, 5.0));
        assert!(approx_eq(row.std_dev_secs, 2.0));
        assert!(approx_eq(row.variance_secs2, 4.0));
    }

    #[test]
    fn test_empty_table() {
        assert!(reduce_table(&StatsTable::new()).is_empty());
    }

    #[test]
    fn test_entry_without_samples_degenerates_to_zero() {
        let mut table = StatsTable::new();
        table.entry("open");

        let rows = reduce_table(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].events, 0);
        assert_eq!(rows[0].share, 0.0);
        assert_eq!(rows[0].average_secs, 0.0);
        assert_eq!(rows[0].std_dev_secs, 0.0);
        assert!(!rows[0].variance_secs2.is_nan());
    }
}
