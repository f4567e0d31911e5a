//! Configuration for the client settings module

use serde::Deserialize;

/// Client settings configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Languages the client ships translations for
    #[serde(default = "default_known_languages")]
    pub known_languages: Vec<String>,

    /// Persisted language override applied at startup; empty means none
    #[serde(default)]
    pub language_override: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            known_languages: default_known_languages(),
            language_override: String::new(),
        }
    }
}

fn default_known_languages() -> Vec<String> {
    ["en_us", "de_de", "ja_jp", "pt_br", "ru_ru", "zh_cn"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
