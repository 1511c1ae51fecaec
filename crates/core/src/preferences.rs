//! Per-user display preferences: theme and locale.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en";

/// BCP 47 style tag: a 2-3 letter language, optionally a region or script.
static LOCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}(-[A-Za-z]{4})?(-([A-Z]{2}|[0-9]{3}))?$").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(format!(
                "Invalid theme '{s}'. Must be one of: light, dark, system"
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

pub fn validate_locale(locale: &str) -> Result<(), String> {
    if LOCALE_RE.is_match(locale) {
        Ok(())
    } else {
        Err(format!("Invalid locale '{locale}'"))
    }
}
