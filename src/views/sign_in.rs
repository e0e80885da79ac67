use crate::models::auth::LoginRequest;
use crate::views::route::Route;
use crate::views::{report_failure, ViewContext};
use tracing::{info, warn};

pub const USERNAME_REQUIRED: &str = "Username Tidak Boleh Kosong";
pub const PASSWORD_REQUIRED: &str = "Password Tidak Boleh Kosong";
pub const LOGIN_SUCCESS: &str = "Login Berhasil";

pub struct SignInView {
    ctx: ViewContext,
}

impl SignInView {
    pub fn new(ctx: ViewContext) -> Self {
        Self { ctx }
    }

    /// Validate the credentials, log in and store the token.
    ///
    /// Returns the route to navigate to on success; on any failure a toast is
    /// queued and the caller stays on the sign-in page.
    pub async fn submit(&self, username: &str, password: &str) -> Option<Route> {
        if username.is_empty() {
            self.ctx.toasts.error(USERNAME_REQUIRED);
            return None;
        }

        if password.is_empty() {
            self.ctx.toasts.error(PASSWORD_REQUIRED);
            return None;
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let token = match self.ctx.scope.run(self.ctx.api.login(&request)).await? {
            Ok(token) => token,
            Err(e) => {
                // The login endpoint has no session to expire, so this only toasts
                report_failure(&self.ctx.toasts, &e, &e.to_string());
                return None;
            }
        };

        if let Err(e) = self.ctx.session.store(token) {
            warn!(error = %e, "Failed to persist session token");
            self.ctx.toasts.error(e.to_string());
            return None;
        }

        info!(username = %username, "Signed in");
        self.ctx.toasts.success(LOGIN_SUCCESS);
        Some(Route::Home)
    }
}
