use crate::i18n::{
    BraceInterpolator, LanguageIdentifier, ResolutionSettings, StaticContentsUrl,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_KEY_ERROR_MESSAGE,
};
use anyhow::{bail, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Bundle hosting
    pub base_url: String,
    pub fetch_timeout: Duration,

    // Languages
    pub supported_languages: Vec<LanguageIdentifier>,
    pub default_language: LanguageIdentifier,
    pub preferred_language: LanguageIdentifier,

    // Presentation
    pub key_error_message: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let supported_languages: Vec<LanguageIdentifier> =
            std::env::var("I18N_SUPPORTED_LANGUAGES")
                .unwrap_or_else(|_| "en".to_string())
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(LanguageIdentifier::from)
                .collect();

        if supported_languages.is_empty() {
            bail!("I18N_SUPPORTED_LANGUAGES must list at least one language");
        }

        let default_language = LanguageIdentifier::new(
            std::env::var("I18N_DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
        );

        if !supported_languages.contains(&default_language) {
            bail!(
                "I18N_DEFAULT_LANGUAGE '{}' is not in I18N_SUPPORTED_LANGUAGES",
                default_language
            );
        }

        Ok(Self {
            // Falls back to PUBLIC_URL, then NEXT_PUBLIC_BASE_PATH
            base_url: std::env::var("I18N_BASE_URL")
                .or_else(|_| std::env::var("PUBLIC_URL"))
                .or_else(|_| std::env::var("NEXT_PUBLIC_BASE_PATH"))
                .unwrap_or_default(),
            fetch_timeout: std::env::var("I18N_FETCH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),

            preferred_language: std::env::var("I18N_PREFERRED_LANGUAGE")
                .map(LanguageIdentifier::from)
                .unwrap_or_else(|_| default_language.clone()),
            default_language,
            supported_languages,

            key_error_message: std::env::var("I18N_KEY_ERROR_MESSAGE")
                .unwrap_or_else(|_| DEFAULT_KEY_ERROR_MESSAGE.to_string()),
        })
    }

    /// Resolution settings using the default bundle layout and brace interpolation.
    pub fn settings(&self) -> ResolutionSettings {
        ResolutionSettings::default()
            .with_contents_url(StaticContentsUrl::new(self.base_url.clone()))
            .with_interpolator(BraceInterpolator)
            .with_key_error_message(self.key_error_message.clone())
            .with_supported_languages(self.supported_languages.iter().cloned())
            .with_default_language(self.default_language.clone())
            .with_preferred_language(self.preferred_language.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "I18N_BASE_URL",
        "PUBLIC_URL",
        "NEXT_PUBLIC_BASE_PATH",
        "I18N_FETCH_TIMEOUT_SECS",
        "I18N_SUPPORTED_LANGUAGES",
        "I18N_DEFAULT_LANGUAGE",
        "I18N_PREFERRED_LANGUAGE",
        "I18N_KEY_ERROR_MESSAGE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().expect("defaults should load");

        assert_eq!(config.base_url, "");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.supported_languages, vec![LanguageIdentifier::new("en")]);
        assert_eq!(config.default_language.code(), "en");
        assert_eq!(config.preferred_language.code(), "en");
        assert_eq!(config.key_error_message, "%%_USE_I18N_STRING_ERROR_%%");
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_env();
        std::env::set_var("I18N_BASE_URL", "https://cdn.example.com");
        std::env::set_var("I18N_SUPPORTED_LANGUAGES", "en, fr ,pt-BR");
        std::env::set_var("I18N_DEFAULT_LANGUAGE", "fr");
        std::env::set_var("I18N_PREFERRED_LANGUAGE", "pt-BR");
        std::env::set_var("I18N_KEY_ERROR_MESSAGE", "??");
        std::env::set_var("I18N_FETCH_TIMEOUT_SECS", "3");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "https://cdn.example.com");
        assert_eq!(config.supported_languages.len(), 3);
        assert_eq!(config.supported_languages[2].code(), "pt-BR");
        assert_eq!(config.default_language.code(), "fr");
        assert_eq!(config.preferred_language.code(), "pt-BR");
        assert_eq!(config.key_error_message, "??");
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_base_url_fallbacks() {
        clear_env();
        std::env::set_var("NEXT_PUBLIC_BASE_PATH", "/next");
        assert_eq!(Config::from_env().unwrap().base_url, "/next");

        std::env::set_var("PUBLIC_URL", "/public");
        assert_eq!(Config::from_env().unwrap().base_url, "/public");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_timeout_falls_back() {
        clear_env();
        std::env::set_var("I18N_FETCH_TIMEOUT_SECS", "soon");
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_default_language_must_be_supported() {
        clear_env();
        std::env::set_var("I18N_SUPPORTED_LANGUAGES", "en,fr");
        std::env::set_var("I18N_DEFAULT_LANGUAGE", "de");
        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("'de'"));
    }

    #[test]
    #[serial]
    fn test_empty_supported_list_rejected() {
        clear_env();
        std::env::set_var("I18N_SUPPORTED_LANGUAGES", " , ");
        let result = Config::from_env();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_settings_conversion() {
        clear_env();
        std::env::set_var("I18N_BASE_URL", "https://cdn.example.com");
        std::env::set_var("I18N_SUPPORTED_LANGUAGES", "en,fr");
        let settings = Config::from_env().unwrap().settings();
        clear_env();

        assert!(settings.interpolate.is_some());
        assert!(settings.supports(&LanguageIdentifier::new("fr")));
        assert_eq!(
            settings
                .contents_url
                .contents_url(&LanguageIdentifier::new("fr"), "common"),
            "https://cdn.example.com/static/languages/fr/common.lang.json"
        );
    }
}
