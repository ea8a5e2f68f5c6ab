use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregation::{AnalyzedCase, Dimension};
use crate::core::errors::FilterError;
use crate::core::types::{CasePriority, CaseStatus, CaseType, ResolutionBucket};

/// Dimensions a view can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Status,
    Type,
    Priority,
    Resolution,
    Creator,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 5] = [
        FilterDimension::Status,
        FilterDimension::Type,
        FilterDimension::Priority,
        FilterDimension::Resolution,
        FilterDimension::Creator,
    ];

    pub fn chart_dimension(&self) -> Dimension {
        match self {
            FilterDimension::Status => Dimension::Status,
            FilterDimension::Type => Dimension::Type,
            FilterDimension::Priority => Dimension::Priority,
            FilterDimension::Resolution => Dimension::Resolution,
            FilterDimension::Creator => Dimension::Creator,
        }
    }

    pub fn title(&self) -> &'static str {
        self.chart_dimension().title()
    }
}

/// A concrete value on one dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    Status(CaseStatus),
    Type(CaseType),
    Priority(CasePriority),
    Resolution(ResolutionBucket),
    /// Creator id
    Creator(String),
}

impl FilterValue {
    pub fn dimension(&self) -> FilterDimension {
        match self {
            FilterValue::Status(_) => FilterDimension::Status,
            FilterValue::Type(_) => FilterDimension::Type,
            FilterValue::Priority(_) => FilterDimension::Priority,
            FilterValue::Resolution(_) => FilterDimension::Resolution,
            FilterValue::Creator(_) => FilterDimension::Creator,
        }
    }

    /// Id of the matching chart segment
    pub fn segment_id(&self) -> &str {
        match self {
            FilterValue::Status(s) => s.as_str(),
            FilterValue::Type(t) => t.as_str(),
            FilterValue::Priority(p) => p.as_str(),
            FilterValue::Resolution(b) => b.as_str(),
            FilterValue::Creator(id) => id,
        }
    }

    /// Build a value from a segment id or a command-line argument
    pub fn parse(dimension: FilterDimension, raw: &str) -> Result<Self, FilterError> {
        let unknown = || FilterError::UnknownValue {
            dimension,
            value: raw.to_string(),
        };
        let upper = raw.trim().to_uppercase();
        match dimension {
            FilterDimension::Status => upper.parse().map(FilterValue::Status).map_err(|_| unknown()),
            FilterDimension::Type => upper.parse().map(FilterValue::Type).map_err(|_| unknown()),
            FilterDimension::Priority => {
                upper.parse().map(FilterValue::Priority).map_err(|_| unknown())
            }
            FilterDimension::Resolution => {
                upper.parse().map(FilterValue::Resolution).map_err(|_| unknown())
            }
            FilterDimension::Creator => {
                let id = raw.trim();
                if id.is_empty() {
                    Err(unknown())
                } else {
                    Ok(FilterValue::Creator(id.to_string()))
                }
            }
        }
    }

    pub fn matches(&self, case: &AnalyzedCase<'_>) -> bool {
        let record = case.record;
        match self {
            FilterValue::Status(s) => record.status == *s,
            FilterValue::Type(t) => record.case_type == *t,
            FilterValue::Priority(p) => record.priority == *p,
            FilterValue::Resolution(b) => case.resolution.bucket() == Some(*b),
            FilterValue::Creator(id) => record.creator.id == *id,
        }
    }
}

/// What a dimension is currently filtered to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    All,
    Only(FilterValue),
}

/// At most one selected value per dimension; absent means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilterState {
    selections: BTreeMap<FilterDimension, FilterValue>,
}

impl ActiveFilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self, dimension: FilterDimension) -> Selection {
        match self.selections.get(&dimension) {
            Some(value) => Selection::Only(value.clone()),
            None => Selection::All,
        }
    }

    pub fn value(&self, dimension: FilterDimension) -> Option<&FilterValue> {
        self.selections.get(&dimension)
    }

    /// Select `value` on its dimension, or reset the dimension if it was
    /// already the selected value. Other dimensions are untouched.
    pub fn toggle(&mut self, value: FilterValue) -> Selection {
        let dimension = value.dimension();
        if self.selections.get(&dimension) == Some(&value) {
            self.selections.remove(&dimension);
            Selection::All
        } else {
            self.selections.insert(dimension, value.clone());
            Selection::Only(value)
        }
    }

    pub fn clear(&mut self, dimension: FilterDimension) {
        self.selections.remove(&dimension);
    }

    pub fn clear_all(&mut self) {
        self.selections.clear();
    }

    pub fn is_any_active(&self) -> bool {
        !self.selections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilterDimension, &FilterValue)> {
        self.selections.iter()
    }

    /// AND of every active filter, optionally ignoring one dimension
    pub fn matches(&self, case: &AnalyzedCase<'_>, except: Option<FilterDimension>) -> bool {
        self.selections
            .iter()
            .filter(|(dimension, _)| Some(**dimension) != except)
            .all(|(_, value)| value.matches(case))
    }
}
