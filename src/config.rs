use anyhow::{bail, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Locales
    pub supported_locales: Vec<String>,
    pub default_locale: String,

    // Preference cookie
    pub locale_cookie_name: String,

    // Paths the resolver never evaluates
    pub excluded_prefixes: Vec<String>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_locales: Vec<String> = std::env::var("SUPPORTED_LOCALES")
            .unwrap_or_else(|_| "en,es,fr,de,it".to_string())
            .split(',')
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if supported_locales.is_empty() {
            bail!("SUPPORTED_LOCALES must name at least one locale");
        }

        Ok(Self {
            supported_locales,

            default_locale: std::env::var("DEFAULT_LOCALE")
                .map(|s| s.trim().to_ascii_lowercase())
                .unwrap_or_else(|_| "en".to_string()),

            locale_cookie_name: std::env::var("LOCALE_COOKIE_NAME")
                .unwrap_or_else(|_| "locale_pref".to_string()),

            excluded_prefixes: std::env::var("EXCLUDED_PREFIXES")
                .unwrap_or_else(|_| "/api,/_assets".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }
}
