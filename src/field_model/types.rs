//! Closed vocabularies for field descriptors
//!
//! Physical type, logical type, OLAP role, aggregation type and the mapping
//! tables between them. Every enum parses case-insensitively and serializes
//! as its uppercase literal.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error when parsing an enum literal
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEnumError {
    /// Name of the vocabulary, e.g. "data type"
    pub kind: &'static str,
    pub input: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown {} '{}'. Valid options: {}",
            self.kind,
            self.input,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for ParseEnumError {}

/// Implements `Display`, `FromStr` and string serde for a fieldless enum
/// given its `(variant, literal)` table.
macro_rules! literal_enum {
    ($ty:ident, $kind:literal, [$(($variant:ident, $lit:literal)),+ $(,)?]) => {
        impl $ty {
            /// All literals of this vocabulary in declaration order
            pub const LITERALS: &'static [&'static str] = &[$($lit),+];

            /// All variants in declaration order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The canonical uppercase literal
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $lit),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($lit => Ok($ty::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        input: s.to_string(),
                        expected: $ty::LITERALS,
                    }),
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $ty::from_str(&s).map_err(serde::de::Error::custom)
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

pub(crate) use literal_enum;

// ============================================================================
// DataType
// ============================================================================

/// Physical data type of a field on the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    Text,
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    Timestamp,
    Array,
    Map,
    Struct,
}

literal_enum!(DataType, "data type", [
    (String, "STRING"),
    (Text, "TEXT"),
    (Boolean, "BOOLEAN"),
    (Integer, "INTEGER"),
    (Long, "LONG"),
    (Float, "FLOAT"),
    (Double, "DOUBLE"),
    (Timestamp, "TIMESTAMP"),
    (Array, "ARRAY"),
    (Map, "MAP"),
    (Struct, "STRUCT"),
]);

impl Default for DataType {
    fn default() -> Self {
        DataType::String
    }
}

impl DataType {
    /// Check if this is a numeric type (integer or floating point)
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Integer | DataType::Long | DataType::Float | DataType::Double
        )
    }

    /// Logical type used when a field carries none of its own
    pub fn to_logical_type(&self) -> LogicalType {
        match self {
            DataType::String => LogicalType::String,
            DataType::Text => LogicalType::Text,
            DataType::Boolean => LogicalType::Boolean,
            DataType::Integer | DataType::Long => LogicalType::Integer,
            DataType::Float | DataType::Double => LogicalType::Double,
            DataType::Timestamp => LogicalType::Timestamp,
            DataType::Array => LogicalType::Array,
            DataType::Map => LogicalType::Map,
            DataType::Struct => LogicalType::String,
        }
    }

    /// OLAP role used when a field carries none of its own
    pub fn to_role(&self) -> FieldRole {
        match self {
            DataType::Timestamp => FieldRole::Timestamp,
            t if t.is_numeric() => FieldRole::Measure,
            _ => FieldRole::Dimension,
        }
    }
}

// ============================================================================
// LogicalType
// ============================================================================

/// Semantic type layered over the physical type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    String,
    Text,
    Boolean,
    Integer,
    Double,
    Timestamp,
    Array,
    Map,
    IpV4,
    Email,
    Url,
    PostalCode,
    PhoneNumber,
    Currency,
    Percent,
    Latitude,
    Longitude,
    GeoPoint,
    GeoLine,
    GeoPolygon,
}

literal_enum!(LogicalType, "logical type", [
    (String, "STRING"),
    (Text, "TEXT"),
    (Boolean, "BOOLEAN"),
    (Integer, "INTEGER"),
    (Double, "DOUBLE"),
    (Timestamp, "TIMESTAMP"),
    (Array, "ARRAY"),
    (Map, "MAP"),
    (IpV4, "IP_V4"),
    (Email, "EMAIL"),
    (Url, "URL"),
    (PostalCode, "POSTAL_CODE"),
    (PhoneNumber, "PHONE_NUMBER"),
    (Currency, "CURRENCY"),
    (Percent, "PERCENT"),
    (Latitude, "LATITUDE"),
    (Longitude, "LONGITUDE"),
    (GeoPoint, "GEO_POINT"),
    (GeoLine, "GEO_LINE"),
    (GeoPolygon, "GEO_POLYGON"),
]);

impl LogicalType {
    pub fn is_geo(&self) -> bool {
        matches!(
            self,
            LogicalType::GeoPoint | LogicalType::GeoLine | LogicalType::GeoPolygon
        )
    }

    /// Metric type name the engine uses when relaying raw values
    pub fn to_engine_metric_type(&self) -> &'static str {
        match self {
            LogicalType::Integer => "long",
            LogicalType::Double
            | LogicalType::Currency
            | LogicalType::Percent
            | LogicalType::Latitude
            | LogicalType::Longitude => "double",
            LogicalType::Boolean => "boolean",
            LogicalType::Timestamp => "long",
            _ => "string",
        }
    }
}

// ============================================================================
// FieldRole
// ============================================================================

/// OLAP role of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Dimension,
    Measure,
    Timestamp,
}

literal_enum!(FieldRole, "role", [
    (Dimension, "DIMENSION"),
    (Measure, "MEASURE"),
    (Timestamp, "TIMESTAMP"),
]);

// ============================================================================
// AggregationType
// ============================================================================

/// Pre-aggregation applied to a measure field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationType {
    None,
    Sum,
    Avg,
    Count,
    Countd,
    Median,
    Percentile,
    Min,
    Max,
    Area,
    Range,
    Variation,
    Approx,
}

literal_enum!(AggregationType, "aggregation type", [
    (None, "NONE"),
    (Sum, "SUM"),
    (Avg, "AVG"),
    (Count, "COUNT"),
    (Countd, "COUNTD"),
    (Median, "MEDIAN"),
    (Percentile, "PERCENTILE"),
    (Min, "MIN"),
    (Max, "MAX"),
    (Area, "AREA"),
    (Range, "RANGE"),
    (Variation, "VARIATION"),
    (Approx, "APPROX"),
]);

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::None
    }
}

// ============================================================================
// Mandatory filter selectors
// ============================================================================

/// Kind of mandatory filter a field offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Time,
    Inclusion,
}

literal_enum!(SelectorKind, "filter option type", [
    (Time, "TIME"),
    (Inclusion, "INCLUSION"),
]);

/// Widget used to pick values of an inclusion filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InclusionSelector {
    SingleList,
    SingleCombo,
    MultiList,
    MultiCombo,
}

literal_enum!(InclusionSelector, "inclusion selector", [
    (SingleList, "SINGLE_LIST"),
    (SingleCombo, "SINGLE_COMBO"),
    (MultiList, "MULTI_LIST"),
    (MultiCombo, "MULTI_COMBO"),
]);

/// Selectors a time filter may offer
pub const TIME_SELECTORS: &[&str] = &["ALL", "RANGE", "RELATIVE", "LIST", "SINGLE"];

// ============================================================================
// Column type parsing
// ============================================================================

/// Source of the default time format for date/time source columns
pub trait TimeFormatDialect {
    fn default_time_format(&self) -> Option<String>;
}

/// Result of mapping a raw source column type name
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTypeMapping {
    pub data_type: DataType,
    pub role: FieldRole,
    /// Time format for date/time columns, supplied by the dialect
    pub format: Option<String>,
}

/// Map a raw source column type (e.g. `VARCHAR(255)`, `bigint`) to a
/// physical type, role and optional time format.
///
/// Any parenthesized precision suffix is dropped before matching.
/// Unrecognized or empty names fall back to STRING / DIMENSION.
pub fn parse_column_type(dialect: &dyn TimeFormatDialect, column_type: &str) -> ColumnTypeMapping {
    let type_name = column_type
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_uppercase();

    let (data_type, role, format) = match type_name.as_str() {
        "STRING" | "VARCHAR" | "CHAR" => (DataType::String, FieldRole::Dimension, None),
        "TIMESTAMP" | "DATE" => (
            DataType::Timestamp,
            FieldRole::Dimension,
            dialect.default_time_format(),
        ),
        "FLOAT" => (DataType::Float, FieldRole::Measure, None),
        "DOUBLE" | "DECIMAL" => (DataType::Double, FieldRole::Measure, None),
        "TINYINT" | "SMALLINT" | "INT" | "BIGINT" => (DataType::Integer, FieldRole::Measure, None),
        _ => (DataType::String, FieldRole::Dimension, None),
    };

    ColumnTypeMapping { data_type, role, format }
}
