use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use session_auth::{HOME_PATH, INDEX_PATH, LOGIN_PATH, LOGOUT_PATH, REGISTER_PATH};

use super::error::IntoResponseError;

#[derive(Template)]
#[template(path = "index.html")]
pub(super) struct IndexTemplate<'a> {
    pub(super) authenticated: bool,
    pub(super) home_path: &'a str,
    pub(super) logout_path: &'a str,
    pub(super) login_path: &'a str,
    pub(super) register_path: &'a str,
}

impl IndexTemplate<'_> {
    pub(super) fn new(authenticated: bool) -> Self {
        Self {
            authenticated,
            home_path: HOME_PATH,
            logout_path: LOGOUT_PATH,
            login_path: LOGIN_PATH,
            register_path: REGISTER_PATH,
        }
    }
}

/// Profile fields are rendered empty; the view does not look the user up.
#[derive(Template)]
#[template(path = "home.html")]
pub(super) struct HomeTemplate<'a> {
    pub(super) index_path: &'a str,
    pub(super) name: &'a str,
    pub(super) email: &'a str,
}

impl Default for HomeTemplate<'_> {
    fn default() -> Self {
        Self {
            index_path: INDEX_PATH,
            name: "",
            email: "",
        }
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub(super) struct LoginTemplate<'a> {
    pub(super) login_path: &'a str,
    pub(super) register_path: &'a str,
}

impl Default for LoginTemplate<'_> {
    fn default() -> Self {
        Self {
            login_path: LOGIN_PATH,
            register_path: REGISTER_PATH,
        }
    }
}

#[derive(Template)]
#[template(path = "register.html")]
pub(super) struct RegisterTemplate<'a> {
    pub(super) register_path: &'a str,
    pub(super) login_path: &'a str,
}

impl Default for RegisterTemplate<'_> {
    fn default() -> Self {
        Self {
            register_path: REGISTER_PATH,
            login_path: LOGIN_PATH,
        }
    }
}

/// Render a page, turning template failures into a 500
pub(super) fn render(template: impl Template) -> Response {
    match template.render().into_response_error() {
        Ok(html) => Html(html).into_response(),
        Err(err) => err.into_response(),
    }
}
