use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::state::{ActiveFilterState, FilterDimension, FilterValue, Selection};
use crate::aggregation::{
    AggregationEngine, AnalyzedCase, Breakdown, CaseSummary, Dimension, PeriodSeries,
};
use crate::core::errors::FilterError;
use crate::core::palette::Palette;
use crate::core::traits::ChartEventHandler;
use crate::core::types::{CaseRecord, ChartSegment};
use crate::charts::PointerEvent;

/// Human-readable label for one active filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterTag {
    pub dimension: FilterDimension,
    pub title: String,
    pub label: String,
    pub value: FilterValue,
    /// Selected value no longer matches any case in its own chart
    #[serde(default)]
    pub stale: bool,
}

impl FilterTag {
    pub fn text(&self) -> String {
        if self.stale {
            format!("{}: {} (0)", self.title, self.label)
        } else {
            format!("{}: {}", self.title, self.label)
        }
    }
}

/// One chart of the dashboard, computed against the other dimensions' filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub dimension: FilterDimension,
    pub title: String,
    pub breakdown: Breakdown,
    pub active_id: Option<String>,
    pub active_label: Option<String>,
}

/// Everything a dashboard page renders for one filter state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub panels: Vec<ChartPanel>,
    /// Category counts over the globally filtered set
    pub categories: Breakdown,
    /// Monthly status series over the globally filtered set
    pub monthly: PeriodSeries,
    pub total_count: u64,
    pub filtered_count: u64,
    pub summary: CaseSummary,
    pub tags: Vec<FilterTag>,
    pub any_active: bool,
}

impl DashboardSnapshot {
    pub fn panel(&self, dimension: FilterDimension) -> Option<&ChartPanel> {
        self.panels.iter().find(|p| p.dimension == dimension)
    }
}

/// Owns the active filter state of one analytics view
#[derive(Debug, Clone, Default)]
pub struct CrossFilterController {
    state: ActiveFilterState,
    /// Display labels captured when a segment was selected
    labels: BTreeMap<FilterDimension, String>,
    engine: AggregationEngine,
}

impl CrossFilterController {
    pub fn new(engine: AggregationEngine) -> Self {
        Self {
            state: ActiveFilterState::new(),
            labels: BTreeMap::new(),
            engine,
        }
    }

    pub fn engine(&self) -> &AggregationEngine {
        &self.engine
    }

    pub fn state(&self) -> &ActiveFilterState {
        &self.state
    }

    /// Toggle `value` on `dimension`: selecting the active value again resets
    /// the dimension to "all". Other dimensions keep their values.
    pub fn set_filter(
        &mut self,
        dimension: FilterDimension,
        value: FilterValue,
    ) -> Result<Selection, FilterError> {
        if value.dimension() != dimension {
            return Err(FilterError::DimensionMismatch {
                expected: dimension,
                actual: value.dimension(),
            });
        }

        let label = fixed_label(self.engine.palette(), &value);
        let selection = self.state.toggle(value);
        match &selection {
            Selection::All => {
                self.labels.remove(&dimension);
            }
            Selection::Only(value) => {
                self.labels
                    .insert(dimension, label.unwrap_or_else(|| value.segment_id().to_string()));
            }
        }
        debug!("Filter {:?} is now {:?}", dimension, selection);
        Ok(selection)
    }

    /// Toggle the value behind a clicked chart segment
    pub fn select_segment(
        &mut self,
        dimension: FilterDimension,
        segment: &ChartSegment,
    ) -> Result<Selection, FilterError> {
        let id = segment.id.as_deref().unwrap_or(&segment.label);
        let value = FilterValue::parse(dimension, id)?;
        let selection = self.set_filter(dimension, value)?;
        if matches!(selection, Selection::Only(_)) {
            self.labels.insert(dimension, segment.label.clone());
        }
        Ok(selection)
    }

    /// Event handler bound to one chart's dimension
    pub fn handler(&mut self, dimension: FilterDimension) -> DimensionHandler<'_> {
        DimensionHandler {
            controller: self,
            dimension,
        }
    }

    pub fn clear(&mut self, dimension: FilterDimension) {
        self.state.clear(dimension);
        self.labels.remove(&dimension);
    }

    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.labels.clear();
    }

    pub fn is_any_active(&self) -> bool {
        self.state.is_any_active()
    }

    pub fn selection(&self, dimension: FilterDimension) -> Selection {
        self.state.selection(dimension)
    }

    /// Label of the active value on `dimension`, if any
    pub fn active_label(&self, dimension: FilterDimension) -> Option<&str> {
        self.state.value(dimension)?;
        self.labels.get(&dimension).map(String::as_str)
    }

    pub fn filter_tags(&self) -> Vec<FilterTag> {
        self.state
            .iter()
            .map(|(dimension, value)| FilterTag {
                dimension: *dimension,
                title: dimension.title().to_string(),
                label: self
                    .labels
                    .get(dimension)
                    .cloned()
                    .unwrap_or_else(|| value.segment_id().to_string()),
                value: value.clone(),
                stale: false,
            })
            .collect()
    }

    /// Cases passing every active filter, for list and table views
    pub fn filtered<'c, 'a>(&self, cases: &'c [AnalyzedCase<'a>]) -> Vec<&'c AnalyzedCase<'a>> {
        cases.iter().filter(|c| self.state.matches(c, None)).collect()
    }

    /// Cases passing every active filter except the one on `dimension`
    pub fn records_for_chart<'c, 'a>(
        &self,
        cases: &'c [AnalyzedCase<'a>],
        dimension: FilterDimension,
    ) -> Vec<&'c AnalyzedCase<'a>> {
        cases
            .iter()
            .filter(|c| self.state.matches(c, Some(dimension)))
            .collect()
    }

    /// Segments for the chart of `dimension`, computed against the other filters
    pub fn chart_breakdown(&self, cases: &[AnalyzedCase<'_>], dimension: FilterDimension) -> Breakdown {
        let input = self.records_for_chart(cases, dimension);
        self.engine.breakdown(&input, dimension.chart_dimension())
    }

    /// Full dashboard state. `None` (data still loading) gives all-zero output.
    pub fn snapshot(&self, records: Option<&[CaseRecord]>) -> DashboardSnapshot {
        let records = records.unwrap_or(&[]);
        let analyzed = self.engine.analyze(records);

        let panels: Vec<ChartPanel> = FilterDimension::ALL
            .iter()
            .map(|dimension| {
                let breakdown = self.chart_breakdown(&analyzed, *dimension);
                let active_id = self.state.value(*dimension).map(|v| v.segment_id().to_string());
                let active_label = active_id.as_deref().and_then(|id| {
                    breakdown
                        .label_of(id)
                        .map(str::to_string)
                        .or_else(|| self.active_label(*dimension).map(str::to_string))
                });
                ChartPanel {
                    dimension: *dimension,
                    title: dimension.title().to_string(),
                    breakdown,
                    active_id,
                    active_label,
                }
            })
            .collect();

        let filtered = self.filtered(&analyzed);
        let summary = if records.is_empty() {
            CaseSummary::empty()
        } else {
            CaseSummary::compute(&self.engine, &filtered)
        };

        debug!(
            "Snapshot: {} of {} cases pass {} active filters",
            filtered.len(),
            records.len(),
            self.state.iter().count()
        );

        let tags = snapshot_tags(self.filter_tags(), &panels);
        DashboardSnapshot {
            panels,
            categories: self.engine.breakdown(&filtered, Dimension::Category),
            monthly: self.engine.period_series(&filtered, Dimension::Status),
            total_count: records.len() as u64,
            filtered_count: filtered.len() as u64,
            summary,
            tags,
            any_active: self.is_any_active(),
        }
    }
}

/// Resolves tag labels against the charts they filter. Data-driven
/// dimensions only know their display names from the breakdown.
fn snapshot_tags(tags: Vec<FilterTag>, panels: &[ChartPanel]) -> Vec<FilterTag> {
    tags.into_iter()
        .map(|mut tag| {
            let Some(panel) = panels.iter().find(|p| p.dimension == tag.dimension) else {
                return tag;
            };
            let id = tag.value.segment_id().to_string();
            if let Some(label) = panel.breakdown.label_of(&id) {
                tag.label = label.to_string();
            }
            tag.stale = panel.breakdown.value_of(&id) == 0;
            tag
        })
        .collect()
}

fn fixed_label(palette: &Palette, value: &FilterValue) -> Option<String> {
    let swatch = match value {
        FilterValue::Status(s) => palette.status(*s),
        FilterValue::Type(t) => palette.case_type(*t),
        FilterValue::Priority(p) => palette.priority(*p),
        FilterValue::Resolution(b) => palette.resolution(*b),
        FilterValue::Creator(_) => return None,
    };
    Some(swatch.label.clone())
}

/// Routes one chart's events into the controller: left click toggles the
/// segment, right click clears the chart's dimension.
pub struct DimensionHandler<'c> {
    controller: &'c mut CrossFilterController,
    dimension: FilterDimension,
}

impl ChartEventHandler for DimensionHandler<'_> {
    fn on_segment_click(&mut self, segment: &ChartSegment) {
        if let Err(e) = self.controller.select_segment(self.dimension, segment) {
            warn!("Ignoring click on segment '{}': {}", segment.label, e);
        }
    }

    fn on_chart_area_right_click(&mut self, _event: &PointerEvent) {
        self.controller.clear(self.dimension);
    }
}
