use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimeError {
    #[error("unknown timezone identifier {0}")]
    UnknownZone(String),
    #[error("timestamp {timestamp} does not exist in zone {zone}")]
    NonexistentLocalTime {
        timestamp: NaiveDateTime,
        zone: String,
    },
    #[error("timestamp {timestamp} is ambiguous in zone {zone}")]
    AmbiguousLocalTime {
        timestamp: NaiveDateTime,
        zone: String,
    },
    #[error("report timestamp {value} does not match format {format}: {source}")]
    Parse {
        value: String,
        format: String,
        source: chrono::ParseError,
    },
}

pub fn zone(id: &str) -> Result<Tz, TimeError> {
    id.parse::<Tz>()
        .map_err(|_| TimeError::UnknownZone(id.to_string()))
}

pub fn parse_naive(value: &str, format: &str) -> Result<NaiveDateTime, TimeError> {
    NaiveDateTime::parse_from_str(value, format).map_err(|source| TimeError::Parse {
        value: value.to_string(),
        format: format.to_string(),
        source,
    })
}

/// Attaches `source` to a naive timestamp and converts it to `target`.
/// Naivety of the input is enforced by the type; instants that do not exist
/// in the source zone (or exist twice, across DST transitions) are rejected.
pub fn convert(
    naive: NaiveDateTime,
    source: Tz,
    target: Tz,
) -> Result<DateTime<Tz>, TimeError> {
    let aware = match source.from_local_datetime(&naive) {
        LocalResult::Single(value) => value,
        LocalResult::None => {
            return Err(TimeError::NonexistentLocalTime {
                timestamp: naive,
                zone: source.name().to_string(),
            })
        }
        LocalResult::Ambiguous(..) => {
            return Err(TimeError::AmbiguousLocalTime {
                timestamp: naive,
                zone: source.name().to_string(),
            })
        }
    };
    Ok(aware.with_timezone(&target))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{convert, parse_naive, zone, TimeError};

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, 0))
            .expect("valid test timestamp")
    }

    #[test]
    fn converts_utc_report_time_to_display_zone() {
        let source = zone("UTC").expect("utc");
        let target = zone("Europe/Istanbul").expect("istanbul");

        let converted = convert(naive(2020, 4, 5, 6, 37), source, target).expect("convert");

        assert_eq!(converted.format("%H:%M").to_string(), "09:37");
        assert_eq!(converted.format("%z").to_string(), "+0300");
    }

    #[test]
    fn rejects_unknown_zone_identifier() {
        assert!(matches!(
            zone("Mars/Olympus_Mons"),
            Err(TimeError::UnknownZone(_))
        ));
    }

    #[test]
    fn rejects_nonexistent_local_time() {
        // 02:30 on 2021-03-14 was skipped by the US spring-forward transition.
        let source = zone("America/New_York").expect("new york");
        let target = zone("UTC").expect("utc");

        let result = convert(naive(2021, 3, 14, 2, 30), source, target);

        assert!(matches!(result, Err(TimeError::NonexistentLocalTime { .. })));
    }

    #[test]
    fn rejects_ambiguous_local_time() {
        // 01:30 on 2021-11-07 occurred twice when US clocks fell back.
        let source = zone("America/New_York").expect("new york");
        let target = zone("UTC").expect("utc");

        let result = convert(naive(2021, 11, 7, 1, 30), source, target);

        assert!(matches!(result, Err(TimeError::AmbiguousLocalTime { .. })));
    }

    #[test]
    fn parses_report_timestamp_with_configured_format() {
        let parsed = parse_naive("2020-04-05T06:37:00Z", "%Y-%m-%dT%H:%M:%SZ").expect("parse");
        assert_eq!(parsed, naive(2020, 4, 5, 6, 37));
    }

    #[test]
    fn rejects_malformed_report_timestamp() {
        let result = parse_naive("05/04/2020", "%Y-%m-%dT%H:%M:%SZ");
        assert!(matches!(result, Err(TimeError::Parse { .. })));
    }
}
