use serde::{Deserialize, Serialize};

/// Host-persisted plugin settings.
///
/// The host loads these once and hands them to the scraper by value; the
/// scraper never writes them back. There is no validation of the API key --
/// an empty or bogus key simply makes every remote call fail at the
/// transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginSettings {
    /// TMDB API key. Defaults to empty, which causes authentication
    /// rejections on every call until the host supplies one.
    #[serde(default)]
    pub api_key: String,

    /// Preferred metadata language, forwarded to the search and detail
    /// endpoints as a BCP-47 tag.
    #[serde(default = "default_language")]
    pub preferred_language: String,
}

fn default_language() -> String {
    "zh-CN".to_string()
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            preferred_language: default_language(),
        }
    }
}
