//! Language identifiers and the current-language state holder.
//!
//! `LanguageIdentifier` is an opaque locale token compared by exact string
//! match. `LanguageState` tracks the language content is resolved in and only
//! ever switches to a language listed in the settings.

use crate::i18n::ResolutionSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// A locale token such as `en` or `pt-BR`.
///
/// No normalization is performed: `en-US` and `en-us` are different languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageIdentifier(String);

impl LanguageIdentifier {
    /// Create a language identifier from any string-like code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw language code.
    pub fn code(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageIdentifier {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageIdentifier {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl AsRef<str> for LanguageIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Holder of the current language.
///
/// Starts at the settings' default language and reports it to
/// `on_change_language`, then tries to adopt the preferred language through
/// the same guarded setter used by callers.
pub struct LanguageState {
    current: LanguageIdentifier,
    settings: Arc<ResolutionSettings>,
}

impl LanguageState {
    pub fn new(settings: Arc<ResolutionSettings>) -> Self {
        let mut state = Self {
            current: settings.default_language.clone(),
            settings,
        };
        state.notify_change();

        let preferred = state.settings.preferred_language.clone();
        if preferred != state.current {
            state.set_language(preferred);
        }

        state
    }

    /// The language content is currently resolved in.
    pub fn current(&self) -> &LanguageIdentifier {
        &self.current
    }

    /// Request a language change.
    ///
    /// # Returns
    /// `true` if the language is supported (and is now current), `false` if
    /// the request was ignored and the current language is unchanged.
    pub fn set_language(&mut self, requested: impl Into<LanguageIdentifier>) -> bool {
        let requested = requested.into();

        if !self.settings.supports(&requested) {
            warn!(
                "Attempted to set i18n language to unsupported language '{}'",
                requested
            );
            return false;
        }

        if requested == self.current {
            return true;
        }

        info!("Changing language from {} to {}", self.current, requested);
        self.current = requested;
        self.notify_change();

        true
    }

    pub fn settings(&self) -> &Arc<ResolutionSettings> {
        &self.settings
    }

    fn notify_change(&self) {
        if let Some(on_change) = &self.settings.on_change_language {
            on_change(&self.current);
        }
    }
}
