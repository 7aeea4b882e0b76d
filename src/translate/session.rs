// Session state for one translation session

use super::language::{Language, LanguagePair};

/// The mutable state of one translation session.
///
/// Mutated only by the orchestrator task; everyone else sees cloned
/// snapshots published on the watch channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    source_lang: Language,
    target_lang: Language,
    source_text: String,
    translated_text: String,
    is_loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new(source_lang: Language, target_lang: Language) -> Self {
        Self {
            source_lang,
            target_lang,
            source_text: String::new(),
            translated_text: String::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn source_lang(&self) -> Language {
        self.source_lang
    }

    pub fn target_lang(&self) -> Language {
        self.target_lang
    }

    pub fn pair(&self) -> LanguagePair {
        LanguagePair::new(self.source_lang, self.target_lang)
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_source_text(&mut self, text: String) {
        self.source_text = text;
    }

    pub fn set_source_lang(&mut self, lang: Language) {
        self.source_lang = lang;
    }

    pub fn set_target_lang(&mut self, lang: Language) {
        self.target_lang = lang;
    }

    /// Exchange the language pair and drop the now stale translation.
    /// Source text and any error are left in place.
    pub fn swap_languages(&mut self) {
        std::mem::swap(&mut self.source_lang, &mut self.target_lang);
        self.translated_text.clear();
    }

    /// A request is going out: mark loading and clear the previous error.
    pub fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn finish_success(&mut self, translated: String) {
        self.translated_text = translated;
        self.error = None;
        self.is_loading = false;
    }

    /// Failure keeps the previous translation on screen.
    pub fn finish_failure(&mut self, message: String) {
        self.error = Some(message);
        self.is_loading = false;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Language::Portuguese, Language::English)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_product() {
        let session = Session::default();
        assert_eq!(session.source_lang(), Language::Portuguese);
        assert_eq!(session.target_lang(), Language::English);
        assert_eq!(session.source_text(), "");
        assert_eq!(session.translated_text(), "");
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn swap_exchanges_pair_and_clears_translation() {
        let mut session = Session::default();
        session.set_source_text("Olá".to_string());
        session.finish_success("Hello".to_string());

        session.swap_languages();

        assert_eq!(session.source_lang(), Language::English);
        assert_eq!(session.target_lang(), Language::Portuguese);
        assert_eq!(session.translated_text(), "");
        assert_eq!(session.source_text(), "Olá");
    }

    #[test]
    fn swap_is_its_own_inverse() {
        let mut session = Session::default();
        let before = session.pair();
        session.swap_languages();
        session.swap_languages();
        assert_eq!(session.pair(), before);
    }

    #[test]
    fn swap_does_not_clear_error() {
        let mut session = Session::default();
        session.finish_failure("HTTP ERROR: 500".to_string());
        session.swap_languages();
        assert_eq!(session.error(), Some("HTTP ERROR: 500"));
    }

    #[test]
    fn request_lifecycle_success() {
        let mut session = Session::default();
        session.finish_failure("old error".to_string());

        session.begin_request();
        assert!(session.is_loading());
        assert!(session.error().is_none());

        session.finish_success("Hello".to_string());
        assert!(!session.is_loading());
        assert_eq!(session.translated_text(), "Hello");
        assert!(session.error().is_none());
    }

    #[test]
    fn failure_keeps_previous_translation() {
        let mut session = Session::default();
        session.finish_success("Hello".to_string());

        session.begin_request();
        session.finish_failure("HTTP ERROR: 500".to_string());

        assert!(!session.is_loading());
        assert_eq!(session.translated_text(), "Hello");
        assert_eq!(session.error(), Some("HTTP ERROR: 500"));
    }
}
