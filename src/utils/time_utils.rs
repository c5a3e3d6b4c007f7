use chrono::{DateTime, SecondsFormat, Utc};

// Timestamps travel as RFC 3339 strings everywhere in the
// API, same as what the front-end sends on article creation.
// chrono formatting reference:
// https://docs.rs/chrono/0.4.19/chrono/format/strftime/index.html

pub fn current_datetime_rfc3339() -> String {
  Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_rfc3339(value: &str) -> Option<DateTime<chrono::FixedOffset>> {
  DateTime::parse_from_rfc3339(value).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_utc_datetime() {
    let parsed = parse_rfc3339("2024-03-07T21:59:00.000Z");
    assert!(parsed.is_some());
  }

  #[test]
  fn parses_offset_datetime() {
    let parsed = parse_rfc3339("2024-03-07T21:59:00+01:00");
    // 2024-03-07T20:59:00 UTC:
    assert_eq!(1_709_845_140, parsed.unwrap().timestamp());
  }

  #[test]
  fn rejects_date_only_strings() {
    assert!(parse_rfc3339("2024-03-07").is_none());
  }
}
