use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

use super::engine::{AggregationEngine, AnalyzedCase};
use super::resolution::ResolutionStats;
use crate::core::palette::Palette;
use crate::core::types::{CasePriority, CaseStatus, CaseType, ResolutionBucket};

/// Full counts for summary text; zero categories are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub total: u64,
    pub status: BTreeMap<CaseStatus, u64>,
    pub case_type: BTreeMap<CaseType, u64>,
    pub priority: BTreeMap<CasePriority, u64>,
    pub resolution: ResolutionStats,
}

impl CaseSummary {
    pub fn compute(engine: &AggregationEngine, cases: &[&AnalyzedCase<'_>]) -> Self {
        let mut status: BTreeMap<CaseStatus, u64> = CaseStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut case_type: BTreeMap<CaseType, u64> = CaseType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut priority: BTreeMap<CasePriority, u64> =
            CasePriority::ALL.iter().map(|p| (*p, 0)).collect();

        for case in cases {
            *status.entry(case.record.status).or_default() += 1;
            *case_type.entry(case.record.case_type).or_default() += 1;
            *priority.entry(case.record.priority).or_default() += 1;
        }

        Self {
            total: cases.len() as u64,
            status,
            case_type,
            priority,
            resolution: engine.resolution_stats(cases),
        }
    }

    /// All-zero summary for a missing data set
    pub fn empty() -> Self {
        Self {
            total: 0,
            status: CaseStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            case_type: CaseType::ALL.iter().map(|t| (*t, 0)).collect(),
            priority: CasePriority::ALL.iter().map(|p| (*p, 0)).collect(),
            resolution: ResolutionStats::default(),
        }
    }

    /// Human-readable summary using the palette labels
    pub fn describe(&self, palette: &Palette) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Общо сигнали: {}", self.total);

        let _ = writeln!(out, "По статус:");
        for (status, count) in &self.status {
            let _ = writeln!(out, "  {}: {}", palette.status(*status).label, count);
        }
        let _ = writeln!(out, "По тип:");
        for (case_type, count) in &self.case_type {
            let _ = writeln!(out, "  {}: {}", palette.case_type(*case_type).label, count);
        }
        let _ = writeln!(out, "По приоритет:");
        for (priority, count) in &self.priority {
            let _ = writeln!(out, "  {}: {}", palette.priority(*priority).label, count);
        }

        let _ = writeln!(out, "Време за решаване:");
        for bucket in ResolutionBucket::ALL {
            let _ = writeln!(
                out,
                "  {}: {}",
                palette.resolution(bucket).label,
                self.resolution.count(bucket)
            );
        }
        let _ = writeln!(
            out,
            "Решени: {}, нерешени: {}, средно време: {:.1} дни",
            self.resolution.resolved, self.resolution.unresolved, self.resolution.average_days
        );
        out
    }
}
