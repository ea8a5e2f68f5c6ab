use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::dates::parse_timestamp_value;
use super::errors::DataError;

crate::wire_enum! {
    /// Kind of a submitted case
    pub enum CaseType {
        Problem => "PROBLEM",
        Suggestion => "SUGGESTION",
    }
}

crate::wire_enum! {
    /// Priority assigned to a case
    pub enum CasePriority {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

crate::wire_enum! {
    /// Workflow status of a case
    pub enum CaseStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        AwaitingFinance => "AWAITING_FINANCE",
        Closed => "CLOSED",
    }
}

crate::wire_enum! {
    /// Elapsed-time category between case creation and its approved answer
    pub enum ResolutionBucket {
        Under1Day => "UNDER_1_DAY",
        Under5Days => "UNDER_5_DAYS",
        Under10Days => "UNDER_10_DAYS",
        Over10Days => "OVER_10_DAYS",
    }
}

impl CaseStatus {
    /// Statuses whose cases are considered answered for resolution-time statistics
    pub fn counts_as_resolved(&self) -> bool {
        matches!(self, CaseStatus::Closed | CaseStatus::AwaitingFinance)
    }
}

impl ResolutionBucket {
    /// Bucket for an elapsed time in days. Boundaries are inclusive.
    pub fn from_days(days: f64) -> Self {
        if days <= 1.0 {
            ResolutionBucket::Under1Day
        } else if days <= 5.0 {
            ResolutionBucket::Under5Days
        } else if days <= 10.0 {
            ResolutionBucket::Under10Days
        } else {
            ResolutionBucket::Over10Days
        }
    }
}

/// Identity of the user who submitted a case
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatorRef {
    pub id: String,
    pub name: String,
}

impl CreatorRef {
    pub const UNKNOWN_ID: &'static str = "unknown";

    pub fn unknown() -> Self {
        Self {
            id: Self::UNKNOWN_ID.to_string(),
            name: "Неизвестен".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

/// Resolution answer attached to a case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// `None` when the source date could not be parsed
    pub date: Option<DateTime<Utc>>,
    pub approved: bool,
}

/// A normalized case snapshot. The analytics layer only ever reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    /// `None` when the source date could not be parsed
    pub created_at: Option<DateTime<Utc>>,
    pub case_type: CaseType,
    pub priority: CasePriority,
    pub status: CaseStatus,
    pub creator: CreatorRef,
    pub categories: Vec<CategoryRef>,
    pub answers: Vec<Answer>,
}

/// Category metadata as exposed by the data layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMeta {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub experts: Vec<RawUser>,
    #[serde(default)]
    pub managers: Vec<RawUser>,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub archived: bool,
}

/// One slice of a pie chart, or one category of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSegment {
    pub label: String,
    pub value: u64,
    pub color: String,
    /// Stable identifier, usually the wire name of the category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ChartSegment {
    pub fn new(label: impl Into<String>, value: u64, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            color: color.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One named series plotted across grouped or stacked bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeriesConfig {
    pub data_key: String,
    pub label: String,
    pub color: String,
}

/// One bar group: a label (e.g. a month) and a value per series data key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BarDataPoint {
    pub label: String,
    pub values: BTreeMap<String, f64>,
}

impl BarDataPoint {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Value for a series; missing and non-finite values read as zero
    pub fn value(&self, key: &str) -> f64 {
        self.values
            .get(key)
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(0.0)
    }

    /// Sum across the given series
    pub fn total(&self, series: &[BarSeriesConfig]) -> f64 {
        series.iter().map(|s| self.value(&s.data_key)).sum()
    }
}

// Raw shapes as delivered by the data layer

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAnswer {
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub approved: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCaseRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(rename = "type", default)]
    pub case_type: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub creator: Option<RawUser>,
    #[serde(default)]
    pub categories: Option<Vec<RawCategory>>,
    #[serde(default)]
    pub answers: Option<Vec<RawAnswer>>,
}

/// Case feed file: either a bare array or an object with a `cases` field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CaseFeed {
    List(Vec<RawCaseRecord>),
    Wrapped { cases: Vec<RawCaseRecord> },
}

impl CaseFeed {
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        serde_json::from_str(json).map_err(|source| DataError::Json {
            context: "case feed".to_string(),
            source,
        })
    }

    pub fn into_raw(self) -> Vec<RawCaseRecord> {
        match self {
            CaseFeed::List(cases) | CaseFeed::Wrapped { cases } => cases,
        }
    }

    /// Normalize every record, skipping the ones that cannot be counted at all
    pub fn normalize(self) -> Vec<CaseRecord> {
        normalize_records(self.into_raw())
    }
}

/// Normalize a batch. Rejected records are logged and skipped; the batch continues.
pub fn normalize_records(raw: Vec<RawCaseRecord>) -> Vec<CaseRecord> {
    let total = raw.len();
    let records: Vec<CaseRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match record.normalize(index) {
            Ok(case) => Some(case),
            Err(e) => {
                warn!("Skipping case record #{index}: {e}");
                None
            }
        })
        .collect();

    if records.len() != total {
        warn!(
            "Normalized {} of {} case records",
            records.len(),
            total
        );
    }
    records
}

impl RawCaseRecord {
    /// Validate and convert into a [`CaseRecord`].
    ///
    /// Missing or unknown `type`, `priority` or `status` rejects the record.
    /// A malformed creation or answer date does not: the date becomes `None`
    /// and the record only drops out of time-based statistics.
    pub fn normalize(self, index: usize) -> Result<CaseRecord, DataError> {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| format!("#{index}"));

        let case_type = parse_enum(&id, "type", self.case_type)?;
        let priority = parse_enum(&id, "priority", self.priority)?;
        let status = parse_enum(&id, "status", self.status)?;

        let created_at = match self.date.as_ref() {
            Some(value) => match parse_timestamp_value(value) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!("Case {id}: creation date unusable, excluded from time statistics: {e}");
                    None
                }
            },
            None => {
                warn!("Case {id}: no creation date, excluded from time statistics");
                None
            }
        };

        let creator = match self.creator {
            Some(RawUser { id: Some(creator_id), name }) if !creator_id.is_empty() => CreatorRef {
                name: name.unwrap_or_else(|| creator_id.clone()),
                id: creator_id,
            },
            _ => CreatorRef::unknown(),
        };

        let categories = self
            .categories
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| {
                let cat_id = c.id?;
                Some(CategoryRef {
                    name: c.name.unwrap_or_else(|| cat_id.clone()),
                    id: cat_id,
                })
            })
            .collect();

        let answers = self
            .answers
            .unwrap_or_default()
            .into_iter()
            .map(|answer| {
                let date = match answer.date.as_ref().map(parse_timestamp_value) {
                    Some(Ok(date)) => Some(date),
                    Some(Err(e)) => {
                        warn!("Case {id}: answer date unusable: {e}");
                        None
                    }
                    None => None,
                };
                Answer {
                    date,
                    approved: is_approved(answer.approved.as_ref()),
                }
            })
            .collect();

        Ok(CaseRecord {
            id,
            created_at,
            case_type,
            priority,
            status,
            creator,
            categories,
            answers,
        })
    }
}

fn parse_enum<T: std::str::FromStr>(
    case_id: &str,
    field: &'static str,
    value: Option<String>,
) -> Result<T, DataError> {
    let value = value.ok_or_else(|| DataError::MissingField {
        case_id: case_id.to_string(),
        field,
    })?;
    value.parse().map_err(|_| DataError::UnknownEnumValue {
        case_id: case_id.to_string(),
        field,
        value,
    })
}

/// The approved marker is a date or flag in the source; any non-empty,
/// non-false value counts as approved.
fn is_approved(marker: Option<&serde_json::Value>) -> bool {
    match marker {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}
