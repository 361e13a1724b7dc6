use chrono::NaiveDateTime;
use thiserror::Error;

/// The format twitter uses for `created_at` once the leading weekday is removed, e.g.
/// `Wed Oct 10 20:19:24 +0000 2018`. The offset is always `+0000` so it is matched literally.
const DATE_FORMAT: &str = "%b %d %H:%M:%S +0000 %Y";

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// The sortable format written to downstream storage, e.g. `2018-10-10 20:19:24`
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO-8601 with millisecond precision, e.g. `2018-10-10T20:19:24.000Z`
pub const ISO8601_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

#[derive(Debug, Error)]
pub enum TimestampErrorKind {
    #[error("{0:?} is not a weekday abbreviation")]
    Weekday(String),
    #[error(transparent)]
    Format(#[from] chrono::ParseError),
}

#[derive(Debug, Error)]
#[error("unable to parse timestamp {input:?}: {kind}")]
pub struct TimestampError {
    input: String,
    #[source]
    kind: TimestampErrorKind,
}

impl TimestampError {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> &TimestampErrorKind {
        &self.kind
    }
}

/// Parses a twitter timestamp.
/// The weekday must be a known abbreviation but is not checked against the date.
pub fn parse(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let error = |kind| TimestampError {
        input: input.to_string(),
        kind,
    };

    let (weekday, date) = input.trim_start().split_once(' ').unwrap_or((input, ""));

    if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
        return Err(error(TimestampErrorKind::Weekday(weekday.to_string())));
    }

    NaiveDateTime::parse_from_str(date, DATE_FORMAT).map_err(|e| error(e.into()))
}

/// Re-renders a twitter timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn normalize(input: &str) -> Result<String, TimestampError> {
    Ok(parse(input)?.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
}

/// Re-renders a twitter timestamp as an ISO-8601 UTC string
pub fn to_iso8601(input: &str) -> Result<String, TimestampError> {
    Ok(parse(input)?.format(ISO8601_TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("Wed Oct 10 20:19:24 +0000 2018").unwrap(),
            "2018-10-10 20:19:24"
        );
        assert_eq!(
            normalize("Sun Jan 01 00:00:00 +0000 2023").unwrap(),
            "2023-01-01 00:00:00"
        );
    }

    #[test]
    fn test_normalize_rejects_malformed_input() {
        let inputs = vec![
            "not a date",
            "",
            "Wed Oct 10 20:19:24 2018",
            "Wed Foo 10 20:19:24 +0000 2018",
            "Xyz Oct 10 20:19:24 +0000 2018",
            "Wed Oct xx 20:19:24 +0000 2018",
            "Wed Oct 10 20:19 +0000 2018",
            "2018-10-10 20:19:24",
        ];

        for input in inputs {
            let err = normalize(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_normalize_ignores_weekday_mismatch() {
        let cases = vec![
            ("Thu Oct 10 20:19:24 +0000 2018", "2018-10-10 20:19:24"),
            ("mon Jan 01 00:00:00 +0000 2023", "2023-01-01 00:00:00"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                (input, normalize(input).unwrap()),
                (input, expected.to_string())
            );
        }
    }

    #[test]
    fn test_parse_reports_unknown_weekday() {
        let err = parse("Xyz Oct 10 20:19:24 +0000 2018").unwrap_err();
        assert!(matches!(err.kind(), TimestampErrorKind::Weekday(day) if day == "Xyz"));

        let err = parse("Wed Foo 10 20:19:24 +0000 2018").unwrap_err();
        assert!(matches!(err.kind(), TimestampErrorKind::Format(_)));
    }

    #[test]
    fn test_to_iso8601() {
        assert_eq!(
            to_iso8601("Wed Oct 10 20:19:24 +0000 2018").unwrap(),
            "2018-10-10T20:19:24.000Z"
        );
    }
}
