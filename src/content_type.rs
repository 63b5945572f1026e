//! Clipboard content types used to filter the main window.

use serde::{Deserialize, Serialize};

/// Kind of clipboard entry, as classified by the host's capture engine.
///
/// The palette never inspects entries itself; it only hands a content type
/// back to the host when a filter command is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Url,
    Email,
    Image,
    Text,
    Code,
    FilePath,
}

impl ContentType {
    /// All content types, in filter-command order.
    pub const ALL: [ContentType; 6] = [
        ContentType::Url,
        ContentType::Email,
        ContentType::Image,
        ContentType::Text,
        ContentType::Code,
        ContentType::FilePath,
    ];

    /// Plural noun used as the filter command trigger (e.g. "urls").
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Url => "urls",
            Self::Email => "emails",
            Self::Image => "images",
            Self::Text => "text",
            Self::Code => "code",
            Self::FilePath => "paths",
        }
    }

    /// Human-readable label for display.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Url => "URLs",
            Self::Email => "Emails",
            Self::Image => "Images",
            Self::Text => "Text",
            Self::Code => "Code",
            Self::FilePath => "File paths",
        }
    }

    /// Symbolic icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Url => "link",
            Self::Email => "envelope",
            Self::Image => "photo",
            Self::Text => "doc.text",
            Self::Code => "chevron.left.forwardslash.chevron.right",
            Self::FilePath => "folder",
        }
    }
}
