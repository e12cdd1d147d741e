use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::{de::DeserializeOwned, Deserialize};
use server_api::{ApiContext, DefaultAdmin, TokenConfig};
use shared::{
    domain::SubmissionId,
    error::{ApiError, ErrorCode},
    protocol::{
        AckResponse, AdminLoginRequest, AdminLoginResponse, AdminProfileResponse, AdminSummary,
        ContactPayload, ContactResponse, FailureEnvelope, HealthStatus, MarkReadRequest,
        StatsResponse, SubmissionEnvelope, SubmissionPage,
    },
};
use site_core::{
    assets::{content_type, DirectoryAssets},
    scene::{EmbedSceneLoader, MissingSceneLoader, SceneSlot},
    PageShell, SiteConfig,
};
use storage::Storage;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod pages;

use app_state::AppState;
use config::{load_settings, prepare_database_url, DEFAULT_JWT_SECRET};

type HttpError = (StatusCode, Json<FailureEnvelope>);

const INVALID_JSON: &str = "Invalid JSON payload";
const AUTH_REQUIRED: &str = "Authentication required";

#[derive(Debug, Default, Deserialize)]
struct SubmissionsQuery {
    page: Option<String>,
    per_page: Option<String>,
    is_read: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    if settings.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("using the built-in JWT secret; set APP__JWT_SECRET before deploying");
    }

    let database_url = prepare_database_url(&settings.database_url)?;
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let api = ApiContext {
        storage,
        tokens: TokenConfig {
            secret: settings.jwt_secret.clone(),
            ttl_hours: settings.jwt_ttl_hours,
        },
    };
    let default_admin = DefaultAdmin {
        username: settings.admin_username.clone(),
        email: settings.admin_email.clone(),
        password: settings.admin_password.clone(),
    };
    if let Err(error) = server_api::ensure_default_admin(&api, &default_admin).await {
        error!(%error, "failed to create default admin user");
    }

    let site = SiteConfig::from_public_url(&settings.public_url)?;
    let scene = match settings.scene_url.as_deref() {
        Some(source) => SceneSlot::load(&EmbedSceneLoader::new(source)).await,
        None => SceneSlot::load(&MissingSceneLoader).await,
    };

    let state = AppState {
        api,
        site,
        assets: Arc::new(DirectoryAssets::new(&settings.asset_dir)),
        scene,
        max_body_bytes: settings.max_body_bytes,
        cors_origins: settings.cors_origin_list(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let contact = post(submit_contact).layer(RequestBodyLimitLayer::new(state.max_body_bytes));
    let cors = cors_layer(&state.cors_origins);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/api/docs", get(api_docs))
        .route("/admin", get(admin_dashboard))
        .route("/admin/login", get(admin_login_page))
        .route(server_api::submit_contact_route(), contact)
        .route(server_api::admin_login_route(), post(admin_login))
        .route("/api/admin/submissions", get(list_submissions))
        .route(
            "/api/admin/submissions/:submission_id",
            get(get_submission).delete(delete_submission),
        )
        .route(
            "/api/admin/submissions/:submission_id/mark-read",
            patch(mark_submission_read),
        )
        .route("/api/admin/stats", get(admin_stats))
        .route("/api/admin/profile", get(admin_profile))
        .route("/assets/*path", get(asset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_home(&state))
}

fn render_home(state: &AppState) -> String {
    let site = state.site.clone().with_year(Utc::now().year());
    let mut page = PageShell::new(site, state.assets.clone());
    page.set_scene(state.scene.clone());
    page.render()
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthStatus>) {
    match state.api.storage.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "healthy".into(),
                message: pages::SERVICE_NAME.into(),
                version: pages::API_VERSION.into(),
            }),
        ),
        Err(err) => {
            error!(%err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unhealthy".into(),
                    message: "Database unavailable".into(),
                    version: pages::API_VERSION.into(),
                }),
            )
        }
    }
}

async fn api_docs() -> Json<serde_json::Value> {
    Json(pages::api_docs())
}

async fn admin_dashboard() -> Html<String> {
    Html(pages::admin_dashboard_page())
}

async fn admin_login_page() -> Html<String> {
    Html(pages::admin_login_page())
}

async fn asset(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let file = state.assets.resolve(&path).ok_or(StatusCode::NOT_FOUND)?;
    let bytes = tokio::fs::read(&file)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(([(header::CONTENT_TYPE, content_type(&path))], bytes))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ContactResponse>), HttpError> {
    let payload: ContactPayload = parse_json(&body)?;
    let ip = client_ip(&headers, peer.map(|ConnectInfo(addr)| addr));
    let response = server_api::submit_contact(&state.api, &payload, ip)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn admin_login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<AdminLoginResponse>, HttpError> {
    let req: AdminLoginRequest = parse_json(&body)?;
    server_api::admin_login(&state.api, &req)
        .await
        .map(Json)
        .map_err(reject_or("Login failed"))
}

async fn list_submissions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<SubmissionsQuery>,
) -> Result<Json<SubmissionPage>, HttpError> {
    require_admin(&state, &headers).await?;
    let page = query.page.as_deref().and_then(parse_number);
    let per_page = query.per_page.as_deref().and_then(parse_number);
    let is_read = query.is_read.as_deref().and_then(parse_flag);
    server_api::list_submissions(&state.api, page, per_page, is_read)
        .await
        .map(Json)
        .map_err(reject_or("Failed to fetch submissions"))
}

async fn get_submission(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(submission_id): Path<String>,
) -> Result<Json<SubmissionEnvelope>, HttpError> {
    require_admin(&state, &headers).await?;
    let submission_id = parse_submission_id(&submission_id)?;
    let submission = server_api::get_submission(&state.api, submission_id)
        .await
        .map_err(reject_or("Failed to fetch submission"))?;
    Ok(Json(SubmissionEnvelope {
        success: true,
        submission,
    }))
}

async fn delete_submission(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(submission_id): Path<String>,
) -> Result<Json<AckResponse>, HttpError> {
    require_admin(&state, &headers).await?;
    let submission_id = parse_submission_id(&submission_id)?;
    server_api::delete_submission(&state.api, submission_id)
        .await
        .map_err(reject_or("Failed to delete submission"))?;
    Ok(Json(AckResponse {
        success: true,
        message: "Submission deleted successfully".into(),
    }))
}

async fn mark_submission_read(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(submission_id): Path<String>,
    body: Bytes,
) -> Result<Json<SubmissionEnvelope>, HttpError> {
    require_admin(&state, &headers).await?;
    let submission_id = parse_submission_id(&submission_id)?;
    let req: MarkReadRequest = if body.iter().all(u8::is_ascii_whitespace) {
        MarkReadRequest::default()
    } else {
        parse_json(&body)?
    };
    let submission = server_api::mark_submission_read(
        &state.api,
        submission_id,
        req.is_read.unwrap_or(true),
    )
    .await
    .map_err(reject_or("Failed to update submission"))?;
    Ok(Json(SubmissionEnvelope {
        success: true,
        submission,
    }))
}

async fn admin_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, HttpError> {
    require_admin(&state, &headers).await?;
    let stats = server_api::admin_stats(&state.api, Utc::now())
        .await
        .map_err(reject_or("Failed to fetch statistics"))?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

async fn admin_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AdminProfileResponse>, HttpError> {
    let admin = require_admin(&state, &headers).await?;
    let admin = server_api::admin_profile(&state.api, admin.id)
        .await
        .map_err(reject_or("Failed to fetch profile"))?;
    Ok(Json(AdminProfileResponse {
        success: true,
        admin,
    }))
}

async fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<AdminSummary, HttpError> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();
    if bearer.is_empty() {
        return Err(reject(ApiError::unauthorized(AUTH_REQUIRED)));
    }

    server_api::authenticate_admin(&state.api, bearer)
        .await
        .map_err(|err| match err.code {
            ErrorCode::Internal => {
                warn!(error = %err.message, "admin lookup failed during authentication");
                reject(ApiError::unauthorized(AUTH_REQUIRED))
            }
            _ => reject(err),
        })
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|err| {
        info!(%err, "rejected malformed JSON body");
        reject(ApiError::validation(INVALID_JSON))
    })
}

/// First `X-Forwarded-For` hop, else the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// Ids that are not integers can never match a row.
fn parse_submission_id(raw: &str) -> Result<SubmissionId, HttpError> {
    raw.trim()
        .parse()
        .map(SubmissionId)
        .map_err(|_| reject(ApiError::not_found("Submission not found")))
}

fn parse_number(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Unrecognised values disable the filter rather than failing the request.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiError) -> HttpError {
    (status_for(err.code), Json(FailureEnvelope::from(err)))
}

/// Replaces internal error detail with `fallback` after logging it.
fn reject_or(fallback: &'static str) -> impl Fn(ApiError) -> HttpError {
    move |err| {
        if err.code == ErrorCode::Internal {
            error!(error = %err.message, "{fallback}");
            return reject(ApiError::internal(fallback));
        }
        reject(err)
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
