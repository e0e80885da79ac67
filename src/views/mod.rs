//! View controllers of the dashboard.
//!
//! Each view owns its state, talks to the API through [`ViewContext`] and
//! reports outcomes as toasts plus an optional [`route::Route`] to navigate to.

pub mod edit;
pub mod guard;
pub mod list;
pub mod notify;
pub mod route;
pub mod row_menu;
pub mod scope;
pub mod sign_in;

use crate::api::client::{ApiClient, GENERIC_FAILURE};
use crate::core::error::ApiError;
use crate::session::store::SessionStore;
use notify::Toasts;
use route::Route;
use scope::ViewScope;
use std::sync::Arc;

pub const SESSION_EXPIRED_MESSAGE: &str = "Sesi anda telah habis. Silakan login kembali.";

/// Shared collaborators handed to every view
#[derive(Clone)]
pub struct ViewContext {
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub toasts: Arc<Toasts>,
    /// Closed when the signed-in session ends; calls still pending then are dropped
    pub scope: Arc<ViewScope>,
}

impl ViewContext {
    pub fn new(api: Arc<ApiClient>, toasts: Arc<Toasts>) -> Self {
        let session = Arc::clone(api.session());
        Self {
            api,
            session,
            toasts,
            scope: Arc::new(ViewScope::new()),
        }
    }

    pub fn with_scope(mut self, scope: Arc<ViewScope>) -> Self {
        self.scope = scope;
        self
    }
}

/// Turn a failed API call into a toast, and into a redirect to sign-in when
/// the session has expired. `status_message` covers non-ok responses.
pub fn report_failure(toasts: &Toasts, error: &ApiError, status_message: &str) -> Option<Route> {
    match error {
        ApiError::SessionExpired => {
            toasts.error(SESSION_EXPIRED_MESSAGE);
            Some(Route::SignIn)
        }
        ApiError::Status(_) => {
            toasts.error(status_message);
            None
        }
        ApiError::Rejected(message) if message.is_empty() => {
            toasts.error(GENERIC_FAILURE);
            None
        }
        ApiError::Rejected(_) | ApiError::Network(_) | ApiError::Decode(_) => {
            toasts.error(error.to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::ToastLevel;

    #[test]
    fn test_session_expired_redirects() {
        let toasts = Toasts::new();
        let route = report_failure(&toasts, &ApiError::SessionExpired, "retry");

        assert_eq!(route, Some(Route::SignIn));
        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, ToastLevel::Error);
        assert_eq!(drained[0].message, SESSION_EXPIRED_MESSAGE);
    }

    #[test]
    fn test_status_uses_fixed_message() {
        let toasts = Toasts::new();
        let error = ApiError::Status(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(report_failure(&toasts, &error, "coba lagi"), None);
        assert_eq!(toasts.drain()[0].message, "coba lagi");
    }

    #[test]
    fn test_other_errors_surface_their_message() {
        let toasts = Toasts::new();
        let error = ApiError::Decode("bad json".to_string());
        assert_eq!(report_failure(&toasts, &error, "unused"), None);
        assert!(toasts.drain()[0].message.contains("bad json"));

        report_failure(&toasts, &ApiError::Rejected(String::new()), "unused");
        assert_eq!(toasts.drain()[0].message, GENERIC_FAILURE);
    }
}
