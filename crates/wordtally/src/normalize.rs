//! # Text Normalization
//!
//! A [`Normalizer`] is an ordered list of [`NormalizeStep`]s, fixed at
//! construction. Given the same [`NormalizationOptions`] and input, the
//! output is always the same; vocabulary keys depend on that.
//!
//! Step order is fixed: the case/diacritic fold runs before punctuation
//! stripping.

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

/// Which normalizations to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationOptions {
    /// Lowercase the text.
    pub lowercase: bool,

    /// Strip diacritics (`"café"` -> `"cafe"`).
    pub strip_diacritics: bool,

    /// Remove punctuation characters.
    pub strip_punctuation: bool,
}

impl NormalizationOptions {
    /// No normalization at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set lowercasing.
    pub fn with_lowercase(
        mut self,
        lowercase: bool,
    ) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Set diacritic stripping.
    pub fn with_strip_diacritics(
        mut self,
        strip_diacritics: bool,
    ) -> Self {
        self.strip_diacritics = strip_diacritics;
        self
    }

    /// Set punctuation stripping.
    pub fn with_strip_punctuation(
        mut self,
        strip_punctuation: bool,
    ) -> Self {
        self.strip_punctuation = strip_punctuation;
        self
    }

    /// Build the [`Normalizer`] for these options.
    pub fn build(&self) -> Normalizer {
        Normalizer::new(*self)
    }
}

/// A single normalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizeStep {
    /// Unicode lowercase.
    Lowercase,

    /// NFD decompose, then drop nonspacing marks.
    StripDiacritics,

    /// Drop Unicode punctuation and ASCII punctuation/symbols.
    StripPunctuation,
}

impl NormalizeStep {
    /// Apply this step.
    pub fn apply(
        &self,
        text: &str,
    ) -> String {
        match self {
            NormalizeStep::Lowercase => text.to_lowercase(),
            NormalizeStep::StripDiacritics => strip_diacritics(text),
            NormalizeStep::StripPunctuation => strip_punctuation(text),
        }
    }
}

/// Deterministic text normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    options: NormalizationOptions,
    steps: Vec<NormalizeStep>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizationOptions::default())
    }
}

impl Normalizer {
    /// Build a normalizer from options.
    pub fn new(options: NormalizationOptions) -> Self {
        let mut steps = Vec::with_capacity(3);
        if options.lowercase {
            steps.push(NormalizeStep::Lowercase);
        }
        if options.strip_diacritics {
            steps.push(NormalizeStep::StripDiacritics);
        }
        if options.strip_punctuation {
            steps.push(NormalizeStep::StripPunctuation);
        }
        Self { options, steps }
    }

    /// The options this normalizer was built from.
    pub fn options(&self) -> NormalizationOptions {
        self.options
    }

    /// The ordered steps.
    pub fn steps(&self) -> &[NormalizeStep] {
        &self.steps
    }

    /// True if this normalizer never changes its input.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Normalize `text`.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let mut buf = text.to_string();
        for step in &self.steps {
            buf = step.apply(&buf);
        }
        buf
    }
}

/// Remove diacritics: `"Señor Café"` -> `"Senor Cafe"`.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|&c| get_general_category(c) != GeneralCategory::NonspacingMark)
        .nfc()
        .collect()
}

/// Is `c` a punctuation character.
///
/// Covers every Unicode punctuation category, plus ASCII symbols such as
/// `$`, `+`, `<` which Unicode files under "symbol".
pub fn is_punctuation(c: char) -> bool {
    if c.is_ascii_punctuation() {
        return true;
    }
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

/// Remove punctuation: `"¡hola, mundo!"` -> `"hola mundo"`.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|&c| !is_punctuation(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("café"), "cafe");
        assert_eq!(strip_diacritics("naïve résumé"), "naive resume");
        assert_eq!(strip_diacritics("CAFÉ"), "CAFE");
        assert_eq!(strip_diacritics("señor"), "senor");
        assert_eq!(strip_diacritics("façade"), "facade");
        assert_eq!(strip_diacritics("hello"), "hello");
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("¡hola, mundo!"), "hola mundo");
        assert_eq!(strip_punctuation("<<UNK>>"), "UNK");
        assert_eq!(strip_punctuation("a+b=c"), "abc");
        assert_eq!(strip_punctuation("«quoted» — dash"), "quoted  dash");
        assert_eq!(strip_punctuation("plain"), "plain");
    }

    #[test]
    fn test_step_order() {
        let normalizer = NormalizationOptions::none()
            .with_strip_punctuation(true)
            .with_lowercase(true)
            .with_strip_diacritics(true)
            .build();

        assert_eq!(
            normalizer.steps(),
            &[
                NormalizeStep::Lowercase,
                NormalizeStep::StripDiacritics,
                NormalizeStep::StripPunctuation,
            ]
        );
        assert_eq!(normalizer.normalize("¡Él Comió!"), "el comio");
    }

    #[test]
    fn test_identity() {
        let normalizer = Normalizer::default();
        assert!(normalizer.is_identity());
        assert_eq!(normalizer.normalize("Mixed, Case!"), "Mixed, Case!");
    }

    #[test]
    fn test_deterministic() {
        let a = NormalizationOptions::none().with_lowercase(true).build();
        let b = NormalizationOptions::none().with_lowercase(true).build();
        for text in ["ÀÉÎ", "The Cat", "x"] {
            assert_eq!(a.normalize(text), b.normalize(text));
            assert_eq!(a.normalize(text), a.normalize(text));
        }
    }
}
