// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::redirect;
use crate::views::guard;
use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Send unauthenticated requests to the sign-in page
async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    match guard::admit(&state.session) {
        Ok(()) => next.run(request).await,
        Err(route) => {
            tracing::debug!(path = %request.uri().path(), "Unauthenticated request redirected");
            redirect(&route)
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // Authenticated-only views
    let protected = Router::new()
        .route("/", get(crate::handlers::siswa::list_handler))
        .route(
            "/siswa/edit/{id}",
            get(crate::handlers::siswa::edit_page_handler)
                .post(crate::handlers::siswa::edit_submit_handler),
        )
        .route(
            "/siswa/{id}/delete",
            get(crate::handlers::siswa::delete_confirm_handler)
                .post(crate::handlers::siswa::delete_handler),
        )
        .route("/export", get(crate::handlers::export::export_handler))
        .route("/sign-out", post(crate::handlers::auth::sign_out_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_session,
        ));

    Router::new()
        // Public endpoints
        .route(
            "/sign-in",
            get(crate::handlers::auth::sign_in_page_handler)
                .post(crate::handlers::auth::sign_in_handler),
        )
        .route("/health", get(crate::handlers::health::health_handler))

        .merge(protected)

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
