//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while resolving a quote.
///
/// Provider-internal retries never surface individually; callers only see
/// the error left over once a provider has exhausted its options.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Every candidate for a logical symbol failed.
    /// `message` carries the last underlying error.
    #[error("No data found for {symbol}: {message}")]
    SymbolNotResolvable {
        /// The logical symbol that was requested
        symbol: String,
        /// Description of the last failure
        message: String,
    },

    /// A provider that needs a credential was selected without one.
    #[error("{0} API key is not set; cannot use this data provider")]
    CredentialMissing(String),

    /// An upstream response could not be decoded as a price.
    #[error("Could not parse price from response: {0}")]
    UpstreamParseFailure(String),

    /// A lookup answered without a usable (positive, finite) price.
    #[error("No price returned by {provider} for {symbol}")]
    NoPrice {
        /// The provider that answered
        provider: String,
        /// The provider-specific symbol that was queried
        symbol: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// True for failures that mean the symbol could not be priced at all,
    /// as opposed to a misconfigured provider.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::CredentialMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotResolvable {
            symbol: "SX5E".to_string(),
            message: "Provider error: YAHOO - timeout".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "No data found for SX5E: Provider error: YAHOO - timeout"
        );

        let error = MarketDataError::CredentialMissing("OPENAI".to_string());
        assert_eq!(
            format!("{}", error),
            "OPENAI API key is not set; cannot use this data provider"
        );

        let error = MarketDataError::NoPrice {
            provider: "YAHOO".to_string(),
            symbol: "^STOXX50E".to_string(),
        };
        assert_eq!(format!("{}", error), "No price returned by YAHOO for ^STOXX50E");
    }

    #[test]
    fn test_credential_missing_is_not_a_lookup_failure() {
        assert!(!MarketDataError::CredentialMissing("OPENAI".to_string()).is_not_found());
        assert!(MarketDataError::UpstreamParseFailure("???".to_string()).is_not_found());
        assert!(MarketDataError::provider("YAHOO", "boom").is_not_found());
    }
}
