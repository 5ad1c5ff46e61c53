use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use tracing::warn;

use crate::error::ExtractError;

/// What to do with a matched date that does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePolicy {
    /// Keep the article with no date.
    #[default]
    Lenient,
    /// Fail the article.
    Strict,
}

/// Parse `YYYY-MM-DD` with an optional `HH:MM` or `HH:MM:SS` after it.
/// A missing time of day means midnight.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, ExtractError> {
    let raw = raw.trim();
    let fail = |reason: String| ExtractError::DateParse {
        raw: raw.to_string(),
        reason,
    };

    let (day, time) = match (raw.get(..10), raw.get(10..)) {
        (Some(day), Some(time)) => (day, time.trim()),
        _ => return Err(fail("too short for a date".into())),
    };
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| fail(e.to_string()))?;
    let time = if time.is_empty() {
        NaiveTime::MIN
    } else {
        NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .map_err(|e| fail(e.to_string()))?
    };
    Ok(date.and_time(time))
}

/// Turn the raw date field into a timestamp under `policy`.
pub fn resolve_date(
    raw: Option<&str>,
    policy: DatePolicy,
) -> Result<Option<NaiveDateTime>, ExtractError> {
    let raw = match raw {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    match parse_date(raw) {
        Ok(date) => Ok(Some(date)),
        Err(e) if policy == DatePolicy::Lenient => {
            warn!("{e}; keeping article without date");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(parse_date("2021-09-29").unwrap(), ymd_hms(2021, 9, 29, 0, 0, 0));
    }

    #[test]
    fn with_time() {
        assert_eq!(parse_date("2021-09-29 14:22").unwrap(), ymd_hms(2021, 9, 29, 14, 22, 0));
        assert_eq!(parse_date("2021-09-29 14:22:05").unwrap(), ymd_hms(2021, 9, 29, 14, 22, 5));
        assert_eq!(parse_date("2021-09-2914:22").unwrap(), ymd_hms(2021, 9, 29, 14, 22, 0));
    }

    #[test]
    fn invalid_month_and_day() {
        let err = parse_date("2021-13-99").unwrap_err();
        assert!(matches!(err, ExtractError::DateParse { ref raw, .. } if raw == "2021-13-99"));
    }

    #[test]
    fn invalid_time() {
        assert!(parse_date("2021-09-29 25:61").is_err());
    }

    #[test]
    fn strict_policy_fails() {
        let res = resolve_date(Some("2021-13-99"), DatePolicy::Strict);
        assert!(matches!(res, Err(ExtractError::DateParse { .. })));
    }

    #[test]
    fn lenient_policy_degrades_to_none() {
        let res = resolve_date(Some("2021-13-99"), DatePolicy::Lenient).unwrap();
        assert_eq!(res, None);
    }

    #[test]
    fn absent_or_empty_is_none() {
        assert_eq!(resolve_date(None, DatePolicy::Strict).unwrap(), None);
        assert_eq!(resolve_date(Some(""), DatePolicy::Strict).unwrap(), None);
    }

    #[test]
    fn policy_from_config_string() {
        let p: DatePolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(p, DatePolicy::Strict);
        assert_eq!(DatePolicy::default(), DatePolicy::Lenient);
    }
}
