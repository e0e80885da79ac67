use crate::core::state::AppState;
use crate::handlers::redirect;
use crate::render::pages::sign_in_page;
use crate::views::route::Route;
use crate::views::sign_in::SignInView;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Show the sign-in form
///
/// GET /sign-in
pub async fn sign_in_page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let toasts = state.toasts.drain();
    Html(sign_in_page(&toasts, ""))
}

/// Submit credentials
///
/// POST /sign-in
pub async fn sign_in_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SignInForm>,
) -> Response {
    let view = SignInView::new(state.view_context());

    match view.submit(&form.username, &form.password).await {
        Some(route) => {
            // A new session starts from a fresh collection
            state.list.reset();
            redirect(&route)
        }
        None => {
            let toasts = state.toasts.drain();
            Html(sign_in_page(&toasts, &form.username)).into_response()
        }
    }
}

/// Forget the session
///
/// POST /sign-out
pub async fn sign_out_handler(State(state): State<Arc<AppState>>) -> Response {
    if let Err(e) = state.session.clear() {
        warn!(error = %e, "Failed to clear session on sign out");
    }
    state.list.reset();

    redirect(&Route::SignIn)
}
