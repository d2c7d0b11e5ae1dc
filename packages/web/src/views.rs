//! HTML pages, rendered from the askama templates in `templates/`.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate;

/// Login and registration share one form; only the heading and target differ.
#[derive(Template)]
#[template(path = "credentials.html")]
pub struct CredentialsTemplate {
    pub heading: &'static str,
    pub action: &'static str,
    pub error: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "secrets.html")]
pub struct SecretsTemplate;

fn render(template: &impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

pub fn home() -> Response {
    render(&HomeTemplate)
}

pub fn login(error: Option<&'static str>) -> Response {
    render(&CredentialsTemplate {
        heading: "Login",
        action: "/login",
        error,
    })
}

pub fn register(error: Option<&'static str>) -> Response {
    render(&CredentialsTemplate {
        heading: "Register",
        action: "/register",
        error,
    })
}

pub fn secrets() -> Response {
    render(&SecretsTemplate)
}
