use serde::{Deserialize, Serialize};

/// Display language selected by the `lang` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French (default)
    Fr,
    /// English
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::Fr
    }
}

impl Language {
    /// Parse from a query parameter value; anything unrecognized falls
    /// back to the default rather than erroring
    pub fn from_param(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" => Language::En,
            _ => Language::Fr,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}
