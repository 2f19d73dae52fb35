//! Aggregation selection
//!
//! Picks the engine aggregator for a field. Relay fields always get a relay;
//! otherwise the aggregation type decides, and anything without a dedicated
//! aggregator (including no type at all) is summed.

use tracing::debug;

use super::types::{AggregationDescriptor, AggregationKind};
use crate::field_model::{AggregationType, LogicalType};

/// Numeric representation used by sum/min/max
const GENERIC_INPUT_TYPE: &str = "double";

/// Select the aggregation for a field
///
/// # Arguments
/// * `aggregation_type` - Pre-aggregation of the field, if any
/// * `name` - Engine name of the field (output name)
/// * `source_name` - Original column name (input)
/// * `logical_type` - Resolved logical type, used for relays
/// * `is_relay` - Whether the field keeps raw values
pub fn select_aggregation(
    aggregation_type: Option<AggregationType>,
    name: &str,
    source_name: &str,
    logical_type: LogicalType,
    is_relay: bool,
) -> AggregationDescriptor {
    if is_relay {
        return AggregationDescriptor {
            kind: AggregationKind::Relay,
            name: name.to_string(),
            field_name: source_name.to_string(),
            input_type: None,
            type_name: Some(logical_type.to_engine_metric_type().to_string()),
        };
    }

    let kind = match aggregation_type {
        Some(AggregationType::Sum) => AggregationKind::Sum,
        Some(AggregationType::Min) => AggregationKind::Min,
        Some(AggregationType::Max) => AggregationKind::Max,
        Some(AggregationType::Area) => AggregationKind::Area,
        Some(AggregationType::Range) => AggregationKind::Range,
        Some(AggregationType::Variation) => AggregationKind::Variance,
        Some(AggregationType::Approx) => AggregationKind::ApproxHistogramFold,
        other => {
            debug!(field = name, aggregation = ?other, "no dedicated aggregator, using sum");
            AggregationKind::Sum
        }
    };

    let input_type = match kind {
        AggregationKind::Sum | AggregationKind::Min | AggregationKind::Max => {
            Some(GENERIC_INPUT_TYPE.to_string())
        }
        _ => None,
    };

    AggregationDescriptor {
        kind,
        name: name.to_string(),
        field_name: source_name.to_string(),
        input_type,
        type_name: None,
    }
}
