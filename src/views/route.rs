use crate::render::html::encode_query;
use std::fmt;

/// Navigation targets of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    SignIn,
    EditSiswa(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::SignIn => "/sign-in".to_string(),
            Route::EditSiswa(id) => format!("/siswa/edit/{}", encode_query(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
