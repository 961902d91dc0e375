use chatdump_types::TruncationLimits;

/// Per-call formatting configuration.
///
/// Passed explicitly into every formatter so callers can format with
/// different limits concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub limits: TruncationLimits,
    /// Version marker written into document headers
    pub tool_version: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            limits: TruncationLimits::default(),
            tool_version: concat!("chatdump v", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_limits(limits: TruncationLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }
}
