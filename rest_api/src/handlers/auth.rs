// rest_api/src/handlers/auth.rs

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect, Response};
use axum::{Form, Json};
use serde::Deserialize;

use models::errors::ApiError;
use models::medical::{Registration, Role, UserDto};
use security::{TokenGrantForm, TokenResponse};

use crate::error::ApiFailure;
use crate::handlers::envelope;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Form(input): Form<Registration>,
) -> Result<Response, ApiFailure> {
    let user = state.auth.register(input).await?;
    tracing::info!(username = %user.username, role = %user.role, "registered user");
    Ok(envelope(StatusCode::CREATED, user))
}

pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<TokenGrantForm>,
) -> Result<Json<TokenResponse>, ApiFailure> {
    let response = state.auth.token_grant(form).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct AuthorizeParams {
    pub redirect_uri: String,
    pub state: Option<String>,
}

/// Minimal login page for the redirect-based flow. The client's
/// `redirect_uri` and `state` ride along as hidden fields so the login
/// post can complete the handoff.
pub async fn authorize_page(Query(params): Query<AuthorizeParams>) -> Html<String> {
    let redirect_uri = escape_html(&params.redirect_uri);
    let state = escape_html(params.state.as_deref().unwrap_or_default());
    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n<head><title>Sign in</title></head>\n<body>\n\
         <h1>Sign in</h1>\n\
         <form method=\"post\" action=\"/v1/auth/authorize/login\">\n\
         <input type=\"hidden\" name=\"redirect_uri\" value=\"{redirect_uri}\">\n\
         <input type=\"hidden\" name=\"state\" value=\"{state}\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Sign in</button>\n\
         </form>\n</body>\n</html>\n"
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub redirect_uri: String,
    pub state: Option<String>,
}

/// Checks credentials and bounces the browser back to the client with a
/// one-minute authorization code attached.
pub async fn authorize_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, ApiFailure> {
    let code = state
        .auth
        .issue_login_code(&form.username, &form.password)
        .await?;

    let mut params = vec![("code", code)];
    if let Some(client_state) = form.state.filter(|s| !s.is_empty()) {
        params.push(("state", client_state));
    }
    let query = serde_urlencoded::to_string(&params)
        .map_err(|e| ApiError::internal(format!("failed to encode redirect query: {e}")))?;
    let separator = if form.redirect_uri.contains('?') { '&' } else { '?' };
    let target = format!("{}{}{}", form.redirect_uri, separator, query);
    Ok(Redirect::to(&target))
}

/// Role-specific profile of the bearer-token holder. Admins have no
/// profile row, so they get the plain user projection.
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, ApiFailure> {
    match user.role {
        Role::Patient => {
            let profile = state
                .store
                .find_patient_by_user_id(user.id)
                .await
                .ok_or_else(|| ApiError::not_found("patient"))?;
            Ok(envelope(StatusCode::OK, profile))
        }
        Role::Doctor => {
            let profile = state
                .store
                .find_doctor_by_user_id(user.id)
                .await
                .ok_or_else(|| ApiError::not_found("doctor"))?;
            Ok(envelope(StatusCode::OK, profile))
        }
        Role::Admin => Ok(envelope(StatusCode::OK, UserDto::from(&user))),
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
