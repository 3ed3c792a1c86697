//! HTTP surface: router assembly and the shell page handlers.
//!
//! The locale middleware wraps every route, so by the time a handler runs the
//! path either carries a supported locale segment or belongs to an excluded
//! class. Handlers stay thin; real page content belongs to the rendering
//! collaborator.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::SET_COOKIE, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth_gate::{AuthGate, GateAction};
use crate::config::Config;
use crate::i18n::{for_locale, Locale, LocaleRegistry};
use crate::navigation::preference_cookie;
use crate::path;
use crate::resolver;
use crate::session::{IdentityProvider, ProfileStore, SessionState};
use crate::static_params::enumerate_locale_params;

/// Shared request-handling state.
pub struct AppState {
    pub config: Config,
    pub registry: &'static LocaleRegistry,
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
}

/// Build the site router with the locale middleware installed.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/locales", get(list_locales))
        .route("/:locale", get(home_page))
        .route("/:locale/login", get(login_page))
        .route("/:locale/app", get(app_page))
        .route("/:locale/app/*rest", get(app_subpage))
        .route("/:locale/switch/:target", get(switch_locale))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolver::locale_redirect,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html><head><title>{title}</title></head>\
         <body><h1>{title}</h1>{body}</body></html>"
    ))
}

/// Render the not-found page inside the given locale's layout, with a
/// "return home" link that stays locale-prefixed.
fn render_not_found(registry: &LocaleRegistry, locale: Locale) -> Response {
    let strings = for_locale(locale);
    let home = path::encode(registry, locale, "/");
    let body = format!(
        "<p>{}</p><p><a href=\"{home}\">{}</a></p>",
        strings.not_found, strings.return_home
    );
    (StatusCode::NOT_FOUND, page(strings.not_found, &body)).into_response()
}

async fn home_page(
    State(state): State<Arc<AppState>>,
    Path(locale_code): Path<String>,
) -> Response {
    let Some(locale) = state.registry.match_locale(&locale_code) else {
        return render_not_found(state.registry, state.registry.default_locale());
    };
    let strings = for_locale(locale);
    let body = format!("<p>{}</p>", locale.native_name());
    page(strings.home_title, &body).into_response()
}

async fn login_page(
    State(state): State<Arc<AppState>>,
    Path(locale_code): Path<String>,
) -> Response {
    let Some(locale) = state.registry.match_locale(&locale_code) else {
        return render_not_found(state.registry, state.registry.default_locale());
    };
    let strings = for_locale(locale);
    let body = format!("<p>{}</p>", strings.login_prompt);
    page(strings.login_title, &body).into_response()
}

async fn app_page(
    state: State<Arc<AppState>>,
    Path(locale_code): Path<String>,
) -> Response {
    protected_page(state, locale_code).await
}

async fn app_subpage(
    state: State<Arc<AppState>>,
    Path((locale_code, _rest)): Path<(String, String)>,
) -> Response {
    protected_page(state, locale_code).await
}

/// The protected subtree: one gate evaluation per request.
///
/// The locale handed to the gate comes from the path segment of the request
/// being served, never from a default.
async fn protected_page(
    State(state): State<Arc<AppState>>,
    locale_code: String,
) -> Response {
    let Some(locale) = state.registry.match_locale(&locale_code) else {
        return render_not_found(state.registry, state.registry.default_locale());
    };
    let strings = for_locale(locale);

    let session = match state.identity.current_session() {
        Ok(session) => session,
        Err(error) => {
            warn!(%error, "identity provider failed, holding placeholder");
            return page(strings.app_title, &format!("<p>{}</p>", strings.session_loading))
                .into_response();
        }
    };

    let mut gate = AuthGate::new();
    match (gate.observe(state.registry, &session, locale), session) {
        (GateAction::Redirect { target }, _) => Redirect::temporary(&target).into_response(),
        (GateAction::Render, SessionState::Authenticated(identity)) => {
            let who = state
                .profiles
                .get_profile(&identity.id)
                .and_then(|profile| profile.display_name)
                .or(identity.display_name)
                .unwrap_or(identity.id);
            let body = format!("<p>{who}</p>");
            page(strings.app_title, &body).into_response()
        }
        _ => page(strings.app_title, &format!("<p>{}</p>", strings.session_loading))
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SwitchQuery {
    /// Logical path to land on after the switch; defaults to the root.
    to: Option<String>,
}

/// Explicit locale switch: persist the choice, then replace-redirect to the
/// same logical path under the target locale.
async fn switch_locale(
    State(state): State<Arc<AppState>>,
    Path((locale_code, target_code)): Path<(String, String)>,
    Query(query): Query<SwitchQuery>,
) -> Response {
    let current = state
        .registry
        .match_locale(&locale_code)
        .unwrap_or_else(|| state.registry.default_locale());

    let Some(target) = state.registry.match_locale(&target_code) else {
        return render_not_found(state.registry, current);
    };

    let logical = query.to.unwrap_or_else(|| "/".to_string());
    let raw = path::encode(state.registry, target, &logical);
    let cookie = preference_cookie(&state.config.locale_cookie_name, target);

    ([(SET_COOKIE, cookie)], Redirect::temporary(&raw)).into_response()
}

/// Static-param projection for the rendering pipeline; lives under `/api`,
/// an excluded path class, so the resolver never touches it.
async fn list_locales(State(state): State<Arc<AppState>>) -> Response {
    Json(enumerate_locale_params(state.registry)).into_response()
}

/// Unknown logical routes render inside the active locale's layout; paths
/// with no locale (excluded classes) fall back to the default locale.
async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let (locale, _) = path::decode(state.registry, uri.path());
    let locale = locale.unwrap_or_else(|| state.registry.default_locale());
    render_not_found(state.registry, locale)
}
