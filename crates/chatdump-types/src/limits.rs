use serde::{Deserialize, Serialize};

/// Character limit for one content category.
///
/// Serialized as a plain integer; `0` means no truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub enum Limit {
    #[default]
    Unlimited,
    Chars(usize),
}

impl Limit {
    pub fn chars(max: usize) -> Self {
        Self::from(max)
    }

    /// Maximum character count, `None` when unlimited
    pub fn max_chars(self) -> Option<usize> {
        match self {
            Limit::Unlimited => None,
            Limit::Chars(max) => Some(max),
        }
    }
}

impl From<usize> for Limit {
    fn from(max: usize) -> Self {
        if max == 0 {
            Limit::Unlimited
        } else {
            Limit::Chars(max)
        }
    }
}

impl From<Limit> for usize {
    fn from(limit: Limit) -> Self {
        limit.max_chars().unwrap_or(0)
    }
}

/// Truncation limits per content category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationLimits {
    /// Metadata JSON of a tool invocation
    pub tool_use_meta: Limit,
    /// Rich (multiline prose/code) tool input fields
    pub tool_use_content: Limit,
    pub tool_result: Limit,
    pub thinking: Limit,
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            tool_use_meta: Limit::Chars(2000),
            tool_use_content: Limit::Unlimited,
            tool_result: Limit::Chars(10000),
            thinking: Limit::Unlimited,
        }
    }
}

impl TruncationLimits {
    /// Limits that never truncate anything
    pub fn unlimited() -> Self {
        Self {
            tool_use_meta: Limit::Unlimited,
            tool_use_content: Limit::Unlimited,
            tool_result: Limit::Unlimited,
            thinking: Limit::Unlimited,
        }
    }
}
