//! Semantic usage hints attached to palette colours.

use std::fmt;
use std::str::FromStr;

/// A closed set of usage hints. Matching against names is exact and
/// case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hint {
    Error,
    Warning,
    Normal,
    Success,
    Highlight,
    Urgent,
    LowPriority,
    Bold,
    Background,
    BackgroundHighlight,
    FocalPoint,
    Title,
    Subtitle,
    Subsubtitle,
    Todo,
    Fixme,
    Sidebar,
    Subtle,
    Shadow,
    Specular,
    Selection,
    Comment,
    String,
    Keyword,
    Variable,
    Operator,
    Punctuation,
    Inactive,
    Function,
    Method,
    Preprocessor,
    Type,
    Constant,
    Link,
    Cursor,
}

impl Hint {
    /// Every hint, in table order.
    pub const ALL: [Hint; 35] = [
        Hint::Error,
        Hint::Warning,
        Hint::Normal,
        Hint::Success,
        Hint::Highlight,
        Hint::Urgent,
        Hint::LowPriority,
        Hint::Bold,
        Hint::Background,
        Hint::BackgroundHighlight,
        Hint::FocalPoint,
        Hint::Title,
        Hint::Subtitle,
        Hint::Subsubtitle,
        Hint::Todo,
        Hint::Fixme,
        Hint::Sidebar,
        Hint::Subtle,
        Hint::Shadow,
        Hint::Specular,
        Hint::Selection,
        Hint::Comment,
        Hint::String,
        Hint::Keyword,
        Hint::Variable,
        Hint::Operator,
        Hint::Punctuation,
        Hint::Inactive,
        Hint::Function,
        Hint::Method,
        Hint::Preprocessor,
        Hint::Type,
        Hint::Constant,
        Hint::Link,
        Hint::Cursor,
    ];

    /// Canonical name as written in palette documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Hint::Error => "error",
            Hint::Warning => "warning",
            Hint::Normal => "normal",
            Hint::Success => "success",
            Hint::Highlight => "highlight",
            Hint::Urgent => "urgent",
            Hint::LowPriority => "low priority",
            Hint::Bold => "bold",
            Hint::Background => "background",
            Hint::BackgroundHighlight => "background highlight",
            Hint::FocalPoint => "focal point",
            Hint::Title => "title",
            Hint::Subtitle => "subtitle",
            Hint::Subsubtitle => "subsubtitle",
            Hint::Todo => "todo",
            Hint::Fixme => "fixme",
            Hint::Sidebar => "sidebar",
            Hint::Subtle => "subtle",
            Hint::Shadow => "shadow",
            Hint::Specular => "specular",
            Hint::Selection => "selection",
            Hint::Comment => "comment",
            Hint::String => "string",
            Hint::Keyword => "keyword",
            Hint::Variable => "variable",
            Hint::Operator => "operator",
            Hint::Punctuation => "punctuation",
            Hint::Inactive => "inactive",
            Hint::Function => "function",
            Hint::Method => "method",
            Hint::Preprocessor => "preprocessor",
            Hint::Type => "type",
            Hint::Constant => "constant",
            Hint::Link => "link",
            Hint::Cursor => "cursor",
        }
    }

    /// Look up a hint by name. Older palettes spell punctuation as
    /// `puncutation`, which is accepted too.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "puncutation" {
            return Some(Hint::Punctuation);
        }
        Self::ALL.into_iter().find(|hint| hint.as_str() == name)
    }
}

impl FromStr for Hint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown hint '{}'", s))
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
