//! Error types for Graviton

use thiserror::Error;

/// Token registry errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("No token info: registry entry has neither an ERC-20 nor a native variant")]
    MissingInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_info_message() {
        let err = TokenError::MissingInfo;
        assert!(err.to_string().contains("No token info"));
    }
}
