use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The closed catalogue of finding categories. Filters and NOLINT
/// annotations refer to these by their `area/name` spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Category {
    BuildClass,
    BuildHeaderGuard,
    BuildInclude,
    BuildIncludeAlpha,
    BuildIncludeOrder,
    BuildIncludeWhatYouUse,
    ReadabilityFnSize,
    ReadabilityMultilineComment,
    ReadabilityMultilineString,
    ReadabilityNolint,
    RuntimeVirtual,
}

impl Category {
    pub const ALL: [Self; 11] = [
        Self::BuildClass,
        Self::BuildHeaderGuard,
        Self::BuildInclude,
        Self::BuildIncludeAlpha,
        Self::BuildIncludeOrder,
        Self::BuildIncludeWhatYouUse,
        Self::ReadabilityFnSize,
        Self::ReadabilityMultilineComment,
        Self::ReadabilityMultilineString,
        Self::ReadabilityNolint,
        Self::RuntimeVirtual,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuildClass => "build/class",
            Self::BuildHeaderGuard => "build/header_guard",
            Self::BuildInclude => "build/include",
            Self::BuildIncludeAlpha => "build/include_alpha",
            Self::BuildIncludeOrder => "build/include_order",
            Self::BuildIncludeWhatYouUse => "build/include_what_you_use",
            Self::ReadabilityFnSize => "readability/fn_size",
            Self::ReadabilityMultilineComment => "readability/multiline_comment",
            Self::ReadabilityMultilineString => "readability/multiline_string",
            Self::ReadabilityNolint => "readability/nolint",
            Self::RuntimeVirtual => "runtime/virtual",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.as_str()
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
