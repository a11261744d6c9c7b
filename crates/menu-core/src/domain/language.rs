// ============================================================================
// Menu Core - Language Code
// File: crates/menu-core/src/domain/language.rs
// ============================================================================

use serde::{Deserialize, Serialize};

/// Supported menu locales. Variant order matches the textual order used
/// when listings sort by language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Ua,
}

impl LanguageCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Ua => "ua",
            LanguageCode::En => "en",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ua" => Some(LanguageCode::Ua),
            "en" => Some(LanguageCode::En),
            _ => None,
        }
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
