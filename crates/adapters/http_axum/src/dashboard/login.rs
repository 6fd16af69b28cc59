//! Login and logout.
//!
//! `POST /login` takes either a JSON body or the HTML form. Both set the
//! session cookie and redirect to the dashboard; failures answer in the
//! format they were asked in.

use askama::Template;
use axum::Json;
use axum::extract::{Form, FromRequest, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};

use zabdash_app::ports::{IconLibrary, MonitoringApi};
use zabdash_domain::auth::Credentials;
use zabdash_domain::error::DashError;

use crate::error::ApiError;
use crate::session;
use crate::state::AppState;

/// Login page template.
#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    username: String,
    error: Option<String>,
}

impl IntoResponse for LoginTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /login`
pub async fn page() -> LoginTemplate {
    LoginTemplate::default()
}

/// `POST /login` — JSON `{username, password}` or form fields.
pub async fn submit<M, I>(State(state): State<AppState<M, I>>, request: Request) -> Response
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let is_json = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        let credentials = match Json::<Credentials>::from_request(request, &state).await {
            Ok(Json(credentials)) => credentials,
            Err(rejection) => return rejection.into_response(),
        };
        match login(&state, &credentials).await {
            Ok(response) => response,
            Err(err) => ApiError::from(err).into_response(),
        }
    } else {
        let credentials = match Form::<Credentials>::from_request(request, &state).await {
            Ok(Form(credentials)) => credentials,
            Err(rejection) => return rejection.into_response(),
        };
        match login(&state, &credentials).await {
            Ok(response) => response,
            Err(err) => login_failed(credentials.username, &err),
        }
    }
}

/// `POST /logout` — drop the cookie and go back to the login page.
pub async fn logout() -> Response {
    session::to_login()
}

async fn login<M, I>(state: &AppState<M, I>, credentials: &Credentials) -> Result<Response, DashError>
where
    M: MonitoringApi + 'static,
    I: IconLibrary + 'static,
{
    let token = state.auth_service.login(credentials).await?;
    let cookie = session::session_cookie(&token).ok_or(DashError::Unauthorized)?;
    state.poller.follow_session(&token);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}

fn login_failed(username: String, err: &DashError) -> Response {
    let (status, message) = match err {
        DashError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        DashError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            "Login failed: incorrect user name or password.".to_string(),
        ),
        DashError::Upstream(_) => {
            tracing::error!(error = %err, "login failed");
            (
                StatusCode::BAD_GATEWAY,
                "Login failed: the Zabbix server is unavailable.".to_string(),
            )
        }
    };
    let page = LoginTemplate {
        username,
        error: Some(message),
    };
    (status, page).into_response()
}
