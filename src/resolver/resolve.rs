//! Timestamp spec resolution
//!
//! Derives the engine's timestamp spec from a field's format:
//! - no format: engine auto-detection
//! - legacy pattern text: used verbatim, no timezone handling
//! - time format document: pattern (or epoch unit), timezone, locale and a
//!   resolution-time "now" substituted for invalid and missing values

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use super::types::TimestampSpec;
use crate::config::ResolverConfig;
use crate::field_model::{FieldFormat, FormatValue, TimeUnit};

/// Resolve the timestamp spec of `column` using the current time
pub fn resolve_timestamp_spec(
    column: &str,
    format: Option<&FormatValue>,
    config: &ResolverConfig,
) -> TimestampSpec {
    resolve_timestamp_spec_at(column, format, config, Utc::now())
}

/// Resolve the timestamp spec of `column` with `now` as the substitution instant
pub fn resolve_timestamp_spec_at(
    column: &str,
    format: Option<&FormatValue>,
    config: &ResolverConfig,
    now: DateTime<Utc>,
) -> TimestampSpec {
    let mut spec = TimestampSpec::for_column(column);

    let format = match format {
        None => {
            debug!(column, "no format, using engine auto-detection");
            return spec;
        }
        Some(FormatValue::Legacy(raw)) => {
            spec.format = raw.clone();
            return spec;
        }
        Some(FormatValue::Document(format)) => format,
    };

    let (pattern, time) = match format {
        FieldFormat::Custom { pattern, time } => (pattern.as_str(), time),
        FieldFormat::UnixTime { unit, time } => {
            let pattern = if *unit == Some(TimeUnit::Second) {
                TimestampSpec::POSIX
            } else {
                TimestampSpec::MILLIS
            };
            (pattern, time)
        }
        FieldFormat::Continuous { time, .. } => {
            (format.pattern().unwrap_or(TimestampSpec::AUTO), time)
        }
        FieldFormat::Default => {
            debug!(column, "format has no time semantics, using engine auto-detection");
            return spec;
        }
    };

    let tz = resolve_timezone(time.select_timezone(&config.default_timezone), config);
    let substitute = now.with_timezone(&tz).fixed_offset();

    spec.format = pattern.to_string();
    spec.timezone = Some(tz.name().to_string());
    spec.locale = Some(time.select_locale(&config.default_locale).to_string());
    spec.invalid_value = Some(substitute);
    spec.missing_value = Some(substitute);
    spec
}

/// Whether old-style timezone handling applies: the stored format is absent
/// or is legacy text rather than a document
pub fn backward_compatible(format: Option<&FormatValue>) -> bool {
    matches!(format, None | Some(FormatValue::Legacy(_)))
}

fn resolve_timezone(id: &str, config: &ResolverConfig) -> Tz {
    match id.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            warn!(timezone = id, fallback = %config.default_timezone, "unknown timezone");
            config.default_timezone.parse::<Tz>().unwrap_or(Tz::UTC)
        }
    }
}
