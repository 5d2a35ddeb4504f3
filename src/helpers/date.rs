//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date as `YYYY-MM-DD`
pub fn short_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

/// Format a date in ISO 8601 / XML format, keeping its offset
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// Replace TOML datetimes inside `value` with their text form
pub fn stringify_toml_datetimes(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(dt) => {
            let text = dt.to_string();
            *value = toml::Value::String(text);
        }
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_toml_datetimes),
        toml::Value::Table(table) => table
            .iter_mut()
            .for_each(|(_, v)| stringify_toml_datetimes(v)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-04-13T09:05:00+02:00").unwrap()
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(&date()), "2025-04-13");
    }

    #[test]
    fn test_date_xml() {
        assert_eq!(date_xml(&date()), "2025-04-13T09:05:00+02:00");
    }

    #[test]
    fn test_stringify_toml_datetimes() {
        let mut value: toml::Value = toml::from_str::<toml::Table>(
            "updated = 2025-04-13\n[nested]\nat = [1979-05-27T07:32:00Z]\n",
        )
        .map(toml::Value::Table)
        .unwrap();
        stringify_toml_datetimes(&mut value);
        assert_eq!(value["updated"].as_str(), Some("2025-04-13"));
        assert_eq!(value["nested"]["at"][0].as_str(), Some("1979-05-27T07:32:00Z"));
    }

    #[test]
    fn test_full_date() {
        assert_eq!(full_date(&date()), "April 13, 2025");
    }
}
