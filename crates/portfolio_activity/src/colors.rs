//! Chart colors for the language distribution.
//!
//! The mapping is a closed table plus one fallback, matched on the exact
//! language name as reported by the repository feed.

pub const FALLBACK_COLOR: &str = "#8e8e8e";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KnownLanguage {
    JavaScript,
    TypeScript,
    Html,
    Css,
    Java,
    Python,
}

impl KnownLanguage {
    pub const ALL: [KnownLanguage; 6] = [
        KnownLanguage::JavaScript,
        KnownLanguage::TypeScript,
        KnownLanguage::Html,
        KnownLanguage::Css,
        KnownLanguage::Java,
        KnownLanguage::Python,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KnownLanguage::JavaScript => "JavaScript",
            KnownLanguage::TypeScript => "TypeScript",
            KnownLanguage::Html => "HTML",
            KnownLanguage::Css => "CSS",
            KnownLanguage::Java => "Java",
            KnownLanguage::Python => "Python",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            KnownLanguage::JavaScript => "#f7df1e",
            KnownLanguage::TypeScript => "#3178c6",
            KnownLanguage::Html => "#e34c26",
            KnownLanguage::Css => "#264de4",
            KnownLanguage::Java => "#b07219",
            KnownLanguage::Python => "#3776AB",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.name() == name)
    }
}

pub fn language_color(name: &str) -> &'static str {
    KnownLanguage::from_name(name).map_or(FALLBACK_COLOR, KnownLanguage::color)
}
