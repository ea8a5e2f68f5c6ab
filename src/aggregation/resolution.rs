use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::dates::elapsed_days;
use crate::core::types::{CaseRecord, ResolutionBucket};

/// How a single case contributes to resolution-time statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Status is neither CLOSED nor AWAITING_FINANCE
    NotApplicable,
    /// Answered status but no approved answer yet
    NoApprovedAnswer,
    /// Creation date or every approved answer date is unusable
    MalformedDate,
    /// Approved answer predates the case; treated as a data anomaly
    NegativeElapsed { days: f64 },
    Resolved { days: f64, bucket: ResolutionBucket },
}

impl ResolutionOutcome {
    pub fn bucket(&self) -> Option<ResolutionBucket> {
        match self {
            ResolutionOutcome::Resolved { bucket, .. } => Some(*bucket),
            _ => None,
        }
    }

    pub fn days(&self) -> Option<f64> {
        match self {
            ResolutionOutcome::Resolved { days, .. } => Some(*days),
            _ => None,
        }
    }
}

/// Resolution outcome for one case.
///
/// Uses the chronologically latest approved answer; on equal dates the one
/// listed last wins.
pub fn resolve_case(case: &CaseRecord) -> ResolutionOutcome {
    if !case.status.counts_as_resolved() {
        return ResolutionOutcome::NotApplicable;
    }

    let mut approved = case.answers.iter().filter(|a| a.approved).peekable();
    if approved.peek().is_none() {
        return ResolutionOutcome::NoApprovedAnswer;
    }

    let Some(answered_at) = approved.filter_map(|a| a.date).max_by(|a, b| a.cmp(b)) else {
        warn!("Case {}: approved answers have no usable date", case.id);
        return ResolutionOutcome::MalformedDate;
    };

    let Some(created_at) = case.created_at else {
        warn!("Case {}: no usable creation date for resolution time", case.id);
        return ResolutionOutcome::MalformedDate;
    };

    let days = elapsed_days(created_at, answered_at);
    if days < 0.0 {
        debug!(
            "Case {}: approved answer dated {:.2} days before creation, excluded",
            case.id, -days
        );
        return ResolutionOutcome::NegativeElapsed { days };
    }

    ResolutionOutcome::Resolved {
        days,
        bucket: ResolutionBucket::from_days(days),
    }
}

/// Resolution-time statistics over a set of cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStats {
    /// Count per bucket in bucket order
    pub buckets: [u64; 4],
    pub resolved: u64,
    /// Every case without a bucket, including open ones
    pub unresolved: u64,
    pub average_days: f64,
    pub malformed: u64,
    pub negative_elapsed: u64,
}

impl ResolutionStats {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a ResolutionOutcome>) -> Self {
        let mut stats = ResolutionStats::default();
        let mut total = 0_u64;
        let mut total_days = 0.0;

        for outcome in outcomes {
            total += 1;
            match outcome {
                ResolutionOutcome::Resolved { days, bucket } => {
                    stats.buckets[bucket.ordinal()] += 1;
                    stats.resolved += 1;
                    total_days += days;
                }
                ResolutionOutcome::MalformedDate => stats.malformed += 1,
                ResolutionOutcome::NegativeElapsed { .. } => stats.negative_elapsed += 1,
                ResolutionOutcome::NotApplicable | ResolutionOutcome::NoApprovedAnswer => {}
            }
        }

        stats.unresolved = total - stats.resolved;
        stats.average_days = if stats.resolved > 0 {
            total_days / stats.resolved as f64
        } else {
            0.0
        };
        stats
    }

    pub fn count(&self, bucket: ResolutionBucket) -> u64 {
        self.buckets[bucket.ordinal()]
    }
}
