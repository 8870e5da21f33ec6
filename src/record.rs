//! Tweet and like records as seen by the filter and the destroyer
//!
//! Both the archive export and the live API deliver tweet objects with the
//! same field names, so a single wire struct decodes either source.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// `created_at` layout used by the platform, e.g. `Wed Oct 10 20:19:24 +0000 2018`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Text prefix that marks a retweet.
pub const RETWEET_MARKER: &str = "RT @";

/// Reply target written by exports for tweets that are not replies.
const NO_REPLY_PLACEHOLDER: &str = "None";

/// A post or a like, immutable once retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    /// Timestamp exactly as delivered, kept for log output.
    pub created_at: String,
    /// Calendar date of `created_at` in its own offset; `None` when the timestamp is empty.
    pub created_on: Option<NaiveDate>,
    pub text: String,
    pub reply_to: Option<String>,
    pub like_count: u64,
    pub retweet_count: u64,
}

impl Record {
    /// Whether the text carries the retweet marker.
    pub fn is_retweet(&self) -> bool {
        self.text.starts_with(RETWEET_MARKER)
    }

    /// Whether the record answers another user.
    pub fn is_reply(&self) -> bool {
        match self.reply_to.as_deref() {
            None | Some("") | Some(NO_REPLY_PLACEHOLDER) => false,
            Some(_) => true,
        }
    }

    /// Numeric id used as the pagination cursor.
    pub fn numeric_id(&self) -> Result<u64> {
        self.id
            .parse::<u64>()
            .map_err(|_| Error::InvalidResponse(format!("non-numeric tweet id '{}'", self.id)))
    }

    /// Text reduced to ASCII, each other character replaced by `?`.
    pub fn display_text(&self) -> String {
        ascii_safe(&self.text)
    }
}

/// Replace every non-ASCII character with `?`.
pub fn ascii_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

/// Parse a platform `created_at` timestamp into its calendar date.
///
/// The offset is ignored: the date is taken from the wall clock as written.
pub fn parse_created_at(value: &str) -> Result<NaiveDate> {
    DateTime::parse_from_str(value.trim(), CREATED_AT_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value.trim()))
        .map(|dt| dt.naive_local().date())
        .map_err(|e| Error::InvalidDate(format!("'{}': {}", value, e)))
}

/// Tweet object as found in archive exports and API responses.
#[derive(Debug, Deserialize)]
pub struct RawTweet {
    pub id_str: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(alias = "text", default)]
    pub full_text: String,
    #[serde(default)]
    pub in_reply_to_user_id_str: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub favorite_count: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub retweet_count: u64,
}

impl TryFrom<RawTweet> for Record {
    type Error = Error;

    fn try_from(raw: RawTweet) -> Result<Self> {
        let created_at = raw.created_at.unwrap_or_default();
        let created_on = if created_at.is_empty() {
            None
        } else {
            Some(parse_created_at(&created_at)?)
        };

        Ok(Self {
            id: raw.id_str,
            created_at,
            created_on,
            text: raw.full_text,
            reply_to: raw.in_reply_to_user_id_str,
            like_count: raw.favorite_count,
            retweet_count: raw.retweet_count,
        })
    }
}

/// Counts are numbers in API responses and strings in newer exports.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid count {}", n))),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| D::Error::custom(format!("invalid count '{}'", s))),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {:?}",
            other
        ))),
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, created_at: &str, text: &str) -> Record {
    Record {
        id: id.to_string(),
        created_at: created_at.to_string(),
        created_on: if created_at.is_empty() {
            None
        } else {
            Some(parse_created_at(created_at).unwrap())
        },
        text: text.to_string(),
        reply_to: None,
        like_count: 0,
        retweet_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Result<Record> {
        let raw: RawTweet = serde_json::from_value(value)
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;
        Record::try_from(raw)
    }

    #[test]
    fn parses_platform_timestamp_ignoring_offset() {
        let date = parse_created_at("Sat Mar 14 23:30:00 -0500 2020").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 3, 14).unwrap());
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        let date = parse_created_at("2021-07-01T08:00:00+02:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let err = parse_created_at("last tuesday").unwrap_err();
        assert!(matches!(err, Error::InvalidDate(_)));
    }

    #[test]
    fn decodes_archive_tweet_with_string_counts() {
        let record = decode(json!({
            "id_str": "1234",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "full_text": "hello",
            "in_reply_to_user_id_str": "42",
            "favorite_count": "7",
            "retweet_count": "3"
        }))
        .unwrap();

        assert_eq!(record.id, "1234");
        assert_eq!(record.created_on, NaiveDate::from_ymd_opt(2018, 10, 10));
        assert_eq!(record.like_count, 7);
        assert_eq!(record.retweet_count, 3);
        assert!(record.is_reply());
    }

    #[test]
    fn decodes_live_status_with_text_and_null_reply() {
        let record = decode(json!({
            "id": 99,
            "id_str": "99",
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "text": "RT @alice: hi",
            "in_reply_to_user_id_str": null,
            "favorite_count": 0,
            "retweet_count": 12
        }))
        .unwrap();

        assert_eq!(record.text, "RT @alice: hi");
        assert!(record.is_retweet());
        assert!(!record.is_reply());
        assert_eq!(record.retweet_count, 12);
    }

    #[test]
    fn missing_created_at_has_no_date() {
        let record = decode(json!({ "id_str": "5", "full_text": "x" })).unwrap();
        assert_eq!(record.created_at, "");
        assert!(record.created_on.is_none());
        assert_eq!(record.like_count, 0);
    }

    #[test]
    fn invalid_count_is_rejected() {
        let raw = serde_json::from_value::<RawTweet>(json!({
            "id_str": "5",
            "favorite_count": "many"
        }));
        assert!(raw.is_err());
    }

    #[test]
    fn placeholder_reply_target_is_not_a_reply() {
        let mut record = sample("1", "", "text");
        record.reply_to = Some("None".into());
        assert!(!record.is_reply());
        record.reply_to = Some(String::new());
        assert!(!record.is_reply());
        record.reply_to = Some("42".into());
        assert!(record.is_reply());
    }

    #[test]
    fn ascii_safe_replaces_each_non_ascii_char() {
        assert_eq!(ascii_safe("héllo wörld 🎉"), "h?llo w?rld ?");
        assert_eq!(ascii_safe("plain"), "plain");
    }

    #[test]
    fn numeric_id_requires_digits() {
        assert_eq!(sample("500", "", "").numeric_id().unwrap(), 500);
        assert!(matches!(
            sample("abc", "", "").numeric_id(),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn malformed_status_is_invalid_response() {
        let err = decode(json!({"id_str": "1", "retweet_count": [1]})).unwrap_err();
        assert!(matches!(err, Error::InvalidResponse(_)));
        assert!(err.to_string().contains("expected string or number"));
    }
}
