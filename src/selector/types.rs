//! Aggregation descriptors emitted for the ingestion engine

use serde::Serialize;
use std::fmt;

/// Engine aggregator kinds a field can be rolled up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregationKind {
    /// Sum over any numeric input
    Sum,
    Min,
    Max,
    Area,
    Range,
    Variance,
    ApproxHistogramFold,
    /// Keeps raw values, no reduction
    Relay,
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationKind::Sum => write!(f, "sum"),
            AggregationKind::Min => write!(f, "min"),
            AggregationKind::Max => write!(f, "max"),
            AggregationKind::Area => write!(f, "area"),
            AggregationKind::Range => write!(f, "range"),
            AggregationKind::Variance => write!(f, "variance"),
            AggregationKind::ApproxHistogramFold => write!(f, "approxHistogramFold"),
            AggregationKind::Relay => write!(f, "relay"),
        }
    }
}

/// A selected aggregation: which aggregator, under which name, over which column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationDescriptor {
    #[serde(rename = "type")]
    pub kind: AggregationKind,
    /// Output name on the engine
    pub name: String,
    /// Input column (the field's original name)
    pub field_name: String,
    /// Numeric representation for sum/min/max
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    /// Engine value type carried by a relay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}
