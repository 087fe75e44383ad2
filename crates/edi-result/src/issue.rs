//! Line-scoped issue entries

use serde::Serialize;
use std::fmt;

/// A recoverable or advisory condition tied to one line of the source file.
///
/// Issues never abort a parse. Errors collect per-line failures, warnings
/// collect advisories such as a width mismatch; both are returned alongside
/// whatever data was successfully extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineIssue {
    /// 1-based line number among the lines handed to the decoder.
    pub line: usize,
    /// Human-readable description of the condition.
    pub message: String,
}

impl LineIssue {
    /// Build an issue for the given 1-based line.
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linha {}: {}", self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_line_prefix() {
        let issue = LineIssue::new(5, "tamanho 280 (esperado 320)");
        assert_eq!(issue.to_string(), "linha 5: tamanho 280 (esperado 320)");
    }
}
