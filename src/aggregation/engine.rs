use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::resolution::{resolve_case, ResolutionOutcome, ResolutionStats};
use crate::core::palette::Palette;
use crate::core::types::{
    CasePriority, CaseRecord, CaseStatus, CaseType, ChartSegment, ResolutionBucket,
};

/// Grouping dimension of a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Status,
    Type,
    Priority,
    Resolution,
    Creator,
    /// Cases may carry several categories, so this breakdown can sum past the case count
    Category,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Status,
        Dimension::Type,
        Dimension::Priority,
        Dimension::Resolution,
        Dimension::Creator,
        Dimension::Category,
    ];

    /// Chart title
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Status => "Статус",
            Dimension::Type => "Тип",
            Dimension::Priority => "Приоритет",
            Dimension::Resolution => "Време за решаване",
            Dimension::Creator => "Подател",
            Dimension::Category => "Категория",
        }
    }
}

/// Id used for cases without any category
pub const UNCATEGORIZED_ID: &str = "uncategorized";
const UNCATEGORIZED_LABEL: &str = "Без категория";

/// A case together with its precomputed resolution outcome
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedCase<'a> {
    pub record: &'a CaseRecord,
    pub resolution: ResolutionOutcome,
}

/// Segments of one dimension over a set of cases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub dimension: Dimension,
    /// Every known category in definition (or first-appearance) order, zeros included
    pub segments: Vec<ChartSegment>,
    /// Number of cases the breakdown was computed from
    pub total: u64,
}

impl Breakdown {
    pub fn empty(dimension: Dimension, palette: &Palette) -> Self {
        Self {
            dimension,
            segments: fixed_segments(dimension, palette),
            total: 0,
        }
    }

    /// Segments worth a pie slice
    pub fn pie_segments(&self) -> Vec<ChartSegment> {
        self.segments.iter().filter(|s| s.value > 0).cloned().collect()
    }

    pub fn segment_sum(&self) -> u64 {
        self.segments.iter().map(|s| s.value).sum()
    }

    /// Value of the segment with the given id, 0 when absent
    pub fn value_of(&self, id: &str) -> u64 {
        self.segments
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .map_or(0, |s| s.value)
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.id.as_deref() == Some(id))
            .map(|s| s.label.as_str())
    }
}

/// Derives chart-ready segments from case records
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    palette: Palette,
}

impl AggregationEngine {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Precompute per-case resolution outcomes
    pub fn analyze<'a>(&self, records: &'a [CaseRecord]) -> Vec<AnalyzedCase<'a>> {
        records
            .iter()
            .map(|record| AnalyzedCase {
                record,
                resolution: resolve_case(record),
            })
            .collect()
    }

    /// Count `cases` by `dimension`
    pub fn breakdown(&self, cases: &[&AnalyzedCase<'_>], dimension: Dimension) -> Breakdown {
        let mut segments = fixed_segments(dimension, &self.palette);
        let mut positions: HashMap<String, usize> = segments
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.id.clone().map(|id| (id, i)))
            .collect();

        for case in cases {
            for (id, label) in classify(case, dimension) {
                match positions.get(&id) {
                    Some(&position) => segments[position].value += 1,
                    None => {
                        let color = self.palette.rotating(segments.len()).to_string();
                        positions.insert(id.clone(), segments.len());
                        segments.push(ChartSegment::new(label, 1, color).with_id(id));
                    }
                }
            }
        }

        debug!(
            "Breakdown by {:?}: {} cases into {} segments",
            dimension,
            cases.len(),
            segments.len()
        );

        Breakdown {
            dimension,
            segments,
            total: cases.len() as u64,
        }
    }

    /// Convenience for callers holding plain records
    pub fn breakdown_records(&self, records: &[CaseRecord], dimension: Dimension) -> Breakdown {
        let analyzed = self.analyze(records);
        let refs: Vec<&AnalyzedCase<'_>> = analyzed.iter().collect();
        self.breakdown(&refs, dimension)
    }

    pub fn resolution_stats(&self, cases: &[&AnalyzedCase<'_>]) -> ResolutionStats {
        ResolutionStats::from_outcomes(cases.iter().map(|c| &c.resolution))
    }
}

/// Zero-valued segments for every category of a fixed dimension
pub(crate) fn fixed_segments(dimension: Dimension, palette: &Palette) -> Vec<ChartSegment> {
    fn build<T: Copy>(
        all: &[T],
        wire: impl Fn(T) -> &'static str,
        swatch: impl Fn(T) -> (String, String),
    ) -> Vec<ChartSegment> {
        all.iter()
            .map(|v| {
                let (label, color) = swatch(*v);
                ChartSegment::new(label, 0, color).with_id(wire(*v))
            })
            .collect()
    }

    match dimension {
        Dimension::Status => build(&CaseStatus::ALL, |s| s.as_str(), |s| {
            let sw = palette.status(s);
            (sw.label.clone(), sw.color.clone())
        }),
        Dimension::Type => build(&CaseType::ALL, |t| t.as_str(), |t| {
            let sw = palette.case_type(t);
            (sw.label.clone(), sw.color.clone())
        }),
        Dimension::Priority => build(&CasePriority::ALL, |p| p.as_str(), |p| {
            let sw = palette.priority(p);
            (sw.label.clone(), sw.color.clone())
        }),
        Dimension::Resolution => build(&ResolutionBucket::ALL, |b| b.as_str(), |b| {
            let sw = palette.resolution(b);
            (sw.label.clone(), sw.color.clone())
        }),
        Dimension::Creator | Dimension::Category => Vec::new(),
    }
}

/// (id, label) pairs a case contributes to under `dimension`
pub(crate) fn classify(case: &AnalyzedCase<'_>, dimension: Dimension) -> Vec<(String, String)> {
    let record = case.record;
    match dimension {
        Dimension::Status => vec![(record.status.as_str().to_string(), String::new())],
        Dimension::Type => vec![(record.case_type.as_str().to_string(), String::new())],
        Dimension::Priority => vec![(record.priority.as_str().to_string(), String::new())],
        Dimension::Resolution => case
            .resolution
            .bucket()
            .map(|b| vec![(b.as_str().to_string(), String::new())])
            .unwrap_or_default(),
        Dimension::Creator => vec![(record.creator.id.clone(), record.creator.name.clone())],
        Dimension::Category => {
            if record.categories.is_empty() {
                vec![(UNCATEGORIZED_ID.to_string(), UNCATEGORIZED_LABEL.to_string())]
            } else {
                let mut seen = Vec::with_capacity(record.categories.len());
                for category in &record.categories {
                    if !seen.iter().any(|(id, _): &(String, String)| *id == category.id) {
                        seen.push((category.id.clone(), category.name.clone()));
                    }
                }
                seen
            }
        }
    }
}
