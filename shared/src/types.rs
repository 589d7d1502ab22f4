//! Common types used across the assistant

use serde::Serialize;

/// A language the assistant can answer in
///
/// `name` goes into the model prompt; `code` and `voice_name` are for the
/// browser speech providers.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub voice_name: &'static str,
}

pub const LANGUAGES: &[LanguageOption] = &[
    LanguageOption { code: "en-US", name: "English", voice_name: "Google US English" },
    LanguageOption { code: "ta-IN", name: "Tamil", voice_name: "Google தமிழ்" },
    LanguageOption { code: "hi-IN", name: "Hindi", voice_name: "Google हिन्दी" },
    LanguageOption { code: "kn-IN", name: "Kannada", voice_name: "Google ಕನ್ನಡ" },
    LanguageOption { code: "te-IN", name: "Telugu", voice_name: "Google తెలుగు" },
    LanguageOption { code: "ur-IN", name: "Urdu", voice_name: "Google اردو" },
    LanguageOption { code: "bn-IN", name: "Bengali", voice_name: "Google বাংলা" },
    LanguageOption { code: "ml-IN", name: "Malayalam", voice_name: "Google മലയാളം" },
    LanguageOption { code: "pa-IN", name: "Punjabi", voice_name: "Google ਪੰਜਾਬੀ" },
    LanguageOption { code: "gu-IN", name: "Gujarati", voice_name: "Google ગુજરાતી" },
    LanguageOption { code: "or-IN", name: "Odia", voice_name: "Google ଓଡ଼ିଆ" },
];

impl LanguageOption {
    pub fn english() -> &'static LanguageOption {
        &LANGUAGES[0]
    }

    /// Look up by locale code (case-insensitive), falling back to English
    pub fn from_code(code: &str) -> &'static LanguageOption {
        LANGUAGES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
            .unwrap_or_else(Self::english)
    }
}
