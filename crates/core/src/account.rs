//! Account constants: subscriptions, password policy, and the demo login.

use uuid::Uuid;

/// Subscription tier assigned at registration.
pub const DEFAULT_SUBSCRIPTION: &str = "free";

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Demo credentials accepted without a password check when the demo login
/// is enabled in configuration.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "password";
pub const DEMO_NAME: &str = "Demo User";

/// Fixed id of the demo account row.
pub const DEMO_USER_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_de30);

/// True when the credentials are the demo pair.
pub fn is_demo_login(email: &str, password: &str) -> bool {
    email == DEMO_EMAIL && password == DEMO_PASSWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_pair_matches_exactly() {
        assert!(is_demo_login("demo@example.com", "password"));
        assert!(!is_demo_login("demo@example.com", "Password"));
        assert!(!is_demo_login("other@example.com", "password"));
    }

    #[test]
    fn demo_id_is_stable() {
        assert_eq!(
            DEMO_USER_ID.to_string(),
            "00000000-0000-4000-8000-00000000de30"
        );
    }
}
