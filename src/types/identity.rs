use serde::{Deserialize, Serialize};

/// The signed-in user's identity, as reported by the identity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// The user's login name.
    pub username: String,

    /// The user's email address, if the server reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_with_email() {
        let json = serde_json::json!({
            "username": "ada",
            "email": "ada@example.com"
        });
        let identity: UserIdentity = serde_json::from_value(json).unwrap();
        assert_eq!(identity.username, "ada");
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn deserialize_username_only() {
        let json = serde_json::json!({"username": "ada"});
        let identity: UserIdentity = serde_json::from_value(json).unwrap();
        assert_eq!(identity.username, "ada");
        assert!(identity.email.is_none());
    }
}
