use std::env;
use std::str::FromStr;
use std::sync::Arc;

use log::warn;

use crate::persist::{PersistGateway, PreferenceSlice};

/// Interface language. Arabic renders right-to-left, so the direction
/// travels with the language everywhere the value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Text direction for layout: `"ltr"` or `"rtl"`.
    pub fn direction(self) -> &'static str {
        match self {
            Language::En => "ltr",
            Language::Ar => "rtl",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            _ => Err(()),
        }
    }
}

type PreferenceListener = Box<dyn Fn(bool, Language) + Send + Sync>;

/// Display preferences: dark mode and interface language.
///
/// Both survive restarts through the persistence gateway. Every setter
/// persists first, then notifies listeners with the already-updated
/// values; a listener that reads back through the store sees the same
/// state it was handed.
pub struct PreferenceStore {
    dark_mode: bool,
    language: Language,
    persist: Arc<PersistGateway>,
    listeners: Vec<PreferenceListener>,
}

impl PreferenceStore {
    /// Hydrates from the persisted slice when present, otherwise from the
    /// environment: `PORTFOLIO_DARK_MODE` and the `LANG` locale prefix.
    pub fn new(persist: Arc<PersistGateway>) -> Self {
        let (dark_mode, language) = match persist.preferences() {
            Some(slice) => (
                slice.dark_mode,
                slice.language.parse().unwrap_or_default(),
            ),
            None => (env_dark_mode(), env_language()),
        };
        Self {
            dark_mode,
            language,
            persist,
            listeners: Vec::new(),
        }
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Registers a listener invoked after every persisted change.
    pub fn subscribe(&mut self, listener: impl Fn(bool, Language) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(!self.dark_mode);
    }

    pub fn set_theme(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
        self.commit();
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.language.toggled());
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.commit();
    }

    fn commit(&self) {
        let slice = PreferenceSlice {
            dark_mode: self.dark_mode,
            language: self.language.as_str().to_string(),
        };
        if let Err(e) = self.persist.save_preferences(slice) {
            // Non-fatal: the in-memory values stay authoritative.
            warn!("failed to persist preferences: {e}");
        }
        for listener in &self.listeners {
            listener(self.dark_mode, self.language);
        }
    }
}

fn env_dark_mode() -> bool {
    env::var("PORTFOLIO_DARK_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn env_language() -> Language {
    env::var("LANG")
        .ok()
        .filter(|v| v.starts_with("ar"))
        .map(|_| Language::Ar)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn fresh(dir: &std::path::Path) -> PreferenceStore {
        PreferenceStore::new(Arc::new(PersistGateway::open(dir)))
    }

    #[test]
    fn toggling_the_language_twice_is_an_involution() {
        let dir = tempfile::tempdir().unwrap();
        let mut prefs = fresh(dir.path());
        let before = prefs.language();
        prefs.toggle_language();
        assert_ne!(prefs.language(), before);
        prefs.toggle_language();
        assert_eq!(prefs.language(), before);
    }

    #[test]
    fn listeners_observe_the_updated_values() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let last = Arc::new(std::sync::Mutex::new(None));
        let mut prefs = fresh(dir.path());
        let counter = Arc::clone(&calls);
        let sink = Arc::clone(&last);
        prefs.subscribe(move |dark, lang| {
            counter.fetch_add(1, Ordering::SeqCst);
            *sink.lock().unwrap() = Some((dark, lang));
        });
        prefs.set_theme(true);
        assert_eq!(*last.lock().unwrap(), Some((true, Language::En)));
        prefs.toggle_language();
        assert_eq!(*last.lock().unwrap(), Some((true, Language::Ar)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn preferences_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut prefs = fresh(dir.path());
            prefs.set_theme(true);
            prefs.set_language(Language::Ar);
        }
        let reopened = fresh(dir.path());
        assert!(reopened.dark_mode());
        assert_eq!(reopened.language(), Language::Ar);
        assert_eq!(reopened.language().direction(), "rtl");
    }
}
