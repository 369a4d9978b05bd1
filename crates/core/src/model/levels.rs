use serde::{Deserialize, Deserializer, Serialize, Serializer};

//
// ─── ACCURACY ─────────────────────────────────────────────────────────────────
//

/// How strict and thorough the requested feedback should be.
///
/// The four canonical levels are ordered from the narrowest check to the
/// broadest review:
/// - `Basic`: only checks whether the required facts are mentioned
/// - `FactsCorrectness`: fact coverage plus whether each fact is right
/// - `Complete`: facts, basic language structure, and logical flow
/// - `Comprehensive`: everything above plus grammar, register, and rewrites
///
/// Any other label decodes to `Unspecified`, which selects a short fallback
/// instruction instead of failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Accuracy {
    Basic,
    #[default]
    FactsCorrectness,
    Complete,
    Comprehensive,
    Unspecified,
}

impl Accuracy {
    /// The canonical levels in ascending order of thoroughness.
    pub const LEVELS: [Accuracy; 4] = [
        Accuracy::Basic,
        Accuracy::FactsCorrectness,
        Accuracy::Complete,
        Accuracy::Comprehensive,
    ];

    /// Decodes a wire label. Unknown labels map to `Unspecified`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "basic" => Self::Basic,
            "facts_correctness" => Self::FactsCorrectness,
            "complete" => Self::Complete,
            "comprehensive" => Self::Comprehensive,
            _ => Self::Unspecified,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::FactsCorrectness => "facts_correctness",
            Self::Complete => "complete",
            Self::Comprehensive => "comprehensive",
            Self::Unspecified => "unspecified",
        }
    }

    /// Human label used by the analysis level picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic (Facts Coverage Only)",
            Self::FactsCorrectness => "Facts & Correctness",
            Self::Complete => "Complete Analysis",
            Self::Comprehensive => "Comprehensive Review",
            Self::Unspecified => "Default",
        }
    }
}

impl Serialize for Accuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Accuracy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

//
// ─── LANGUAGE ─────────────────────────────────────────────────────────────────
//

/// Language the student answers in and the feedback is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    German,
    English,
    Latin,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::German, Language::English, Language::Latin];

    /// Decodes a wire label. Unknown labels fall back to English.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "german" => Self::German,
            "latin" => Self::Latin,
            _ => Self::English,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::German => "german",
            Self::English => "english",
            Self::Latin => "latin",
        }
    }

    /// Name of the language as written into the model prompt.
    #[must_use]
    pub fn prompt_name(self) -> &'static str {
        match self {
            Self::German => "German",
            Self::English => "English",
            Self::Latin => "Latin",
        }
    }

    /// Name shown in the language picker.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Self::German => "Deutsch",
            Self::English => "English",
            Self::Latin => "Latin",
        }
    }

    /// BCP 47 tag handed to the speech recognizer.
    ///
    /// Recognizers have no Latin model, so Latin answers are captured as English.
    #[must_use]
    pub fn speech_locale(self) -> &'static str {
        match self {
            Self::German => "de-DE",
            Self::English | Self::Latin => "en-US",
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}
