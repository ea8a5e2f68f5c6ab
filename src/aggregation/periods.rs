use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::engine::{classify, fixed_segments, AggregationEngine, AnalyzedCase, Dimension};
use crate::core::types::{BarDataPoint, BarSeriesConfig};

/// Monthly bar data: one group per creation month, one series per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSeries {
    pub data: Vec<BarDataPoint>,
    pub series: Vec<BarSeriesConfig>,
    /// Cases left out because their creation date is unusable
    pub skipped: u64,
}

impl AggregationEngine {
    /// Group cases by creation month (`YYYY-MM`, ascending) and count them per
    /// category of `dimension`
    pub fn period_series(&self, cases: &[&AnalyzedCase<'_>], dimension: Dimension) -> PeriodSeries {
        let mut series: Vec<BarSeriesConfig> = fixed_segments(dimension, self.palette())
            .into_iter()
            .filter_map(|s| {
                s.id.map(|id| BarSeriesConfig {
                    data_key: id,
                    label: s.label,
                    color: s.color,
                })
            })
            .collect();

        let mut months: BTreeMap<String, BarDataPoint> = BTreeMap::new();
        let mut skipped = 0;

        for case in cases {
            let Some(created_at) = case.record.created_at else {
                skipped += 1;
                continue;
            };
            let month = created_at.format("%Y-%m").to_string();
            let point = months
                .entry(month.clone())
                .or_insert_with(|| BarDataPoint::new(month));

            for (id, label) in classify(case, dimension) {
                if !series.iter().any(|s| s.data_key == id) {
                    series.push(BarSeriesConfig {
                        data_key: id.clone(),
                        label,
                        color: self.palette().rotating(series.len()).to_string(),
                    });
                }
                *point.values.entry(id).or_insert(0.0) += 1.0;
            }
        }

        if skipped > 0 {
            warn!("{skipped} cases without a usable creation date left out of the monthly view");
        }

        for point in months.values_mut() {
            for s in &series {
                point.values.entry(s.data_key.clone()).or_insert(0.0);
            }
        }

        PeriodSeries {
            data: months.into_values().collect(),
            series,
            skipped,
        }
    }
}
