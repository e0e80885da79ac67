use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_success_response() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"success": true, "token": "T"}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.token.as_deref(), Some("T"));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_login_failure_response() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"success": false, "message": "Password salah"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Password salah"));
    }

    #[test]
    fn test_missing_success_flag_means_failure() {
        let response: LoginResponse = serde_json::from_str(r#"{"token": "T"}"#).unwrap();
        assert!(!response.success);
    }
}
