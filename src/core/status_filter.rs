use crate::utils::lenient::ParseFallbacks;
use std::collections::HashSet;

/// Set of accepted instance status codes.
///
/// `None` means every status is accepted. That is different from an empty
/// set, which would reject everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusFilter {
    accepted: Option<HashSet<i32>>,
}

impl StatusFilter {
    pub fn accept_all() -> Self {
        Self { accepted: None }
    }

    /// Parses a comma-separated list such as `"0,2"`. A blank list accepts
    /// every status. Zero-length tokens (`"1,"`, `"0,,2"`) are skipped;
    /// whitespace-only or non-numeric tokens count as `0`.
    pub fn parse(codes: &str, fallbacks: &ParseFallbacks) -> Self {
        if codes.trim().is_empty() {
            return Self::accept_all();
        }

        let accepted = codes
            .split(',')
            .filter(|token| !token.is_empty())
            .map(|token| fallbacks.parse_or_zero("status_filter", token.trim()))
            .collect();

        Self {
            accepted: Some(accepted),
        }
    }

    pub fn is_accept_all(&self) -> bool {
        self.accepted.is_none()
    }

    pub fn accepts(&self, status: i32) -> bool {
        match &self.accepted {
            None => true,
            Some(set) => set.contains(&status),
        }
    }
}
