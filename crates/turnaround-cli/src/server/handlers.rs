//! HTTP handlers for the dashboard shell.
//!
//! Every dashboard route sits behind the session gate. Filters arrive as
//! query parameters (`view`, `date`, repeated `aircraft` and `flight`).

use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use turnaround_core::{DataProvider, DateScope, Selection, View};
use turnaround_engine::Dashboard;
use turnaround_render::{HtmlTableRenderer, LoginPage};

use super::error::AppError;
use super::state::AppState;
use crate::commands::{render_fragment, render_markup, RenderRequest};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "turnaround_session";

// =============================================================================
// Session helpers
// =============================================================================

/// Session token carried by the request, if any
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| pair.trim().strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
}

fn is_signed_in(state: &AppState, headers: &HeaderMap) -> bool {
    session_token(headers).is_some_and(|token| state.sessions.is_valid(token))
}

fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax")
}

fn expired_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

// =============================================================================
// Query parsing
// =============================================================================

/// Query parameters in arrival order; `aircraft` and `flight` may repeat
pub type QueryPairs = Vec<(String, String)>;

/// Read `view`, `date`, `aircraft` and `flight` from the query pairs
///
/// Unknown keys and empty values are ignored.
pub fn parse_query(pairs: &[(String, String)]) -> Result<(View, Selection), AppError> {
    let mut view = View::default();
    let mut scope = DateScope::default();
    let mut aircraft = Vec::new();
    let mut flights = Vec::new();

    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "view" => view = value.parse()?,
            "date" => scope = value.parse()?,
            "aircraft" => aircraft.push(value.clone()),
            "flight" => flights.push(value.clone()),
            _ => {}
        }
    }

    Ok((view, Selection::new(scope).aircraft(aircraft).flights(flights)))
}

// =============================================================================
// Login gate
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn login_page(state: &AppState, failed: bool) -> Html<String> {
    Html(
        LoginPage {
            title: &state.config.title,
            palette: &state.config.palette,
            failed,
        }
        .render(),
    )
}

/// GET /login
pub async fn show_login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if is_signed_in(&state, &headers) {
        return Redirect::to("/").into_response();
    }
    login_page(&state, false).into_response()
}

/// POST /login
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if !state.config.auth.verify(&form.username, &form.password) {
        warn!(username = %form.username, "login rejected");
        return (StatusCode::UNAUTHORIZED, login_page(&state, true)).into_response();
    }

    let token = state.sessions.issue();
    info!(username = %form.username, sessions = state.sessions.len(), "login accepted");
    (
        [(header::SET_COOKIE, session_cookie(&token))],
        Redirect::to("/"),
    )
        .into_response()
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if state.sessions.revoke(token) {
            info!(sessions = state.sessions.len(), "signed out");
        }
    }
    (
        [(header::SET_COOKIE, expired_cookie())],
        Redirect::to("/login"),
    )
        .into_response()
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /
pub async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryPairs>,
) -> Result<Response, AppError> {
    if !is_signed_in(&state, &headers) {
        return Ok(Redirect::to("/login").into_response());
    }

    let (view, selection) = parse_query(&query)?;
    debug!(%view, scope = %selection.scope, aircraft = selection.aircraft.len(), flights = selection.flights.len(), "dashboard request");

    let dashboard = Dashboard::new(state.provider.as_ref(), state.today());
    let request = RenderRequest {
        view,
        selection,
        page: true,
        styles: true,
    };
    let page = render_markup(&state.config, &dashboard, &request)?
        .ok_or_else(|| AppError::Internal("dashboard page was not rendered".into()))?;
    Ok(Html(page).into_response())
}

/// GET /table
///
/// Table fragment only; `204 No Content` when the selection matches nothing.
pub async fn table(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<QueryPairs>,
) -> Result<Response, AppError> {
    if !is_signed_in(&state, &headers) {
        return Err(AppError::Unauthorized);
    }

    let (view, selection) = parse_query(&query)?;
    let dashboard = Dashboard::new(state.provider.as_ref(), state.today());
    let renderer = HtmlTableRenderer::new().palette(state.config.palette.clone());

    match render_fragment(&renderer, &dashboard, view, &selection)? {
        Some(html) => Ok(Html(html).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

// =============================================================================
// Health Check
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Size of the base dataset
    pub records: usize,
    /// Reference time the dataset was generated for
    pub generated_at: Option<NaiveDateTime>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        records: state.provider.records().len(),
        generated_at: state.provider.generated_at(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn pairs(query: &str) -> QueryPairs {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn query_defaults() {
        let (view, selection) = parse_query(&[]).unwrap();
        assert_eq!(view, View::All);
        assert_eq!(selection, Selection::default());
    }

    #[test]
    fn query_collects_repeated_keys() {
        let (view, selection) =
            parse_query(&pairs("view=arrival&date=today&aircraft=A1000&aircraft=B2000&flight=KL417&flight=&x=1"))
                .unwrap();
        assert_eq!(view, View::Arrival);
        assert_eq!(selection.scope, DateScope::Today);
        assert_eq!(selection.aircraft, vec!["A1000", "B2000"]);
        assert_eq!(selection.flights, vec!["KL417"]);
    }

    #[test]
    fn bad_query_values_are_rejected() {
        assert!(matches!(parse_query(&pairs("view=cargo")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_query(&pairs("date=tomorrow")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn session_token_is_found_among_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; turnaround_session=abc-123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc-123"));

        let mut other = HeaderMap::new();
        other.insert(header::COOKIE, HeaderValue::from_static("turnaround_sessionx=1"));
        assert_eq!(session_token(&other), None);
    }
}
