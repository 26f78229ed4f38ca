//! Mapping raw failures to messages an end user can read.

/// Category of a failure, as far as an end user is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Connectivity,
    InvalidCredentials,
    AccountNotFound,
    AccountExists,
    AlreadyExists,
    InvalidInput,
    WalletConnection,
    Unknown,
}

/// Ordered rule table; first match wins. Patterns are lower-case.
const RULES: &[(FailureKind, &[&str])] = &[
    (FailureKind::Connectivity, &["network", "fetch"]),
    (
        FailureKind::InvalidCredentials,
        &["invalid login credentials", "invalid credentials", "invalid login"],
    ),
    (FailureKind::AccountNotFound, &["user not found"]),
    (FailureKind::AccountExists, &["email already", "already registered"]),
    (FailureKind::AlreadyExists, &["duplicate key", "unique constraint"]),
    (FailureKind::InvalidInput, &["invalid input", "validation"]),
    (FailureKind::WalletConnection, &["wallet", "metamask"]),
];

impl FailureKind {
    /// Classify a raw failure message.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        RULES
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| lowered.contains(p)))
            .map(|(kind, _)| *kind)
            .unwrap_or(FailureKind::Unknown)
    }

    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Connectivity => {
                "We couldn't reach the server. Please check your internet connection and try again."
            }
            FailureKind::InvalidCredentials => "That email or password doesn't look right. Please try again.",
            FailureKind::AccountNotFound => "We couldn't find an account with that email.",
            FailureKind::AccountExists => "An account with this email already exists. Try signing in instead.",
            FailureKind::AlreadyExists => "This already exists.",
            FailureKind::InvalidInput => "Please check your input and try again.",
            FailureKind::WalletConnection => "We couldn't connect to your wallet. Please try again.",
            FailureKind::Unknown => "Something went wrong. Please try again.",
        }
    }
}

/// Short, non-technical text for a raw failure message. Pure.
pub fn user_friendly_message(message: &str) -> &'static str {
    FailureKind::classify(message).message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_messages() {
        assert_eq!(FailureKind::classify("Invalid login credentials"), FailureKind::InvalidCredentials);
        assert_eq!(FailureKind::classify("TypeError: Network request failed"), FailureKind::Connectivity);
        assert_eq!(FailureKind::classify("Failed to fetch"), FailureKind::Connectivity);
        assert_eq!(FailureKind::classify("User not found"), FailureKind::AccountNotFound);
        assert_eq!(
            FailureKind::classify("Email already registered"),
            FailureKind::AccountExists
        );
        assert_eq!(
            FailureKind::classify("duplicate key value violates unique constraint \"goals_pkey\""),
            FailureKind::AlreadyExists
        );
        assert_eq!(FailureKind::classify("Validation failed: amount"), FailureKind::InvalidInput);
        assert_eq!(FailureKind::classify("MetaMask not detected"), FailureKind::WalletConnection);
    }

    #[test]
    fn test_first_match_wins() {
        // Mentions both the network and a wallet: the network rule is earlier.
        assert_eq!(
            FailureKind::classify("wallet network unavailable"),
            FailureKind::Connectivity
        );
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(
            user_friendly_message("segfault in module 7"),
            "Something went wrong. Please try again."
        );
        assert_eq!(user_friendly_message(""), FailureKind::Unknown.message());
    }

    #[test]
    fn test_deterministic() {
        let a = user_friendly_message("Invalid login credentials");
        let b = user_friendly_message("Invalid login credentials");
        assert_eq!(a, b);
        assert_eq!(a, FailureKind::InvalidCredentials.message());
    }
}
