use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use itertools::Itertools;
use strum::IntoEnumIterator;

/// Multi-word arguments ("Bases Loaded", "John Smith") arrive as separate words.
pub(crate) fn join_words(words: &[String]) -> String {
    words.iter().map(|w| w.trim()).filter(|w| !w.is_empty()).join(" ")
}

pub(crate) fn parse_game_date(date_str: &str) -> Result<NaiveDate> {
    let date_str = date_str.trim();
    if date_str.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date \"{date_str}\", expected YYYY-MM-DD"))
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn label_options<T: IntoEnumIterator + Display>() -> String {
    T::iter().map(|v| v.to_string()).join(", ")
}

/// Parses one of a closed set of labels, listing the valid ones on failure.
pub(crate) fn parse_label<T>(what: &str, words: &[String]) -> Result<T>
where
    T: FromStr + IntoEnumIterator + Display,
{
    let text = join_words(words);
    T::from_str(&text).map_err(|_| {
        anyhow!(
            "Unknown {what} \"{text}\". Choose one of: {}",
            label_options::<T>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit_entry::fields::{Direction, MenOnBase};

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_join_words() {
        assert_eq!(join_words(&words("  John   Smith ")), "John Smith");
        assert_eq!(join_words(&[]), "");
    }

    #[test]
    fn test_parse_game_date() {
        assert_eq!(
            parse_game_date("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(parse_game_date("Today").unwrap(), today());
        assert!(parse_game_date("05/01/2024").is_err());
        assert!(parse_game_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_label_lists_options_on_failure() {
        assert_eq!(
            parse_label::<MenOnBase>("men on base", &words("1B & 3B")).unwrap(),
            MenOnBase::FirstAndThird
        );
        let err = parse_label::<Direction>("direction", &words("deep left")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("deep left"));
        assert!(message.contains("Left-Center"));
    }
}
