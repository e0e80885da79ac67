use crate::session::store::SessionStore;
use crate::views::route::Route;

/// Admit a request to an authenticated-only view, or name where to go instead
pub fn admit(session: &SessionStore) -> Result<(), Route> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(Route::SignIn)
    }
}
