//! HTTP API surface for the tutorial generator.
//!
//! Thin glue over the generator and the datastore: upload endpoints, record
//! listing/editing, stored-video playback and a GitHub OAuth passthrough for
//! the frontend.

use std::{path::PathBuf, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tutorial_datastore::{DataStore, SqliteDataStore, Tutorial};

use crate::{gemini::GeminiClient, TutorialGenerator};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub videos_dir: PathBuf,
    pub allowed_origin: String,
}

struct AppState {
    generator: TutorialGenerator<SqliteDataStore, GeminiClient>,
    store: SqliteDataStore,
    http_client: reqwest::Client,
    config: ServerConfig,
}

type ApiError = (StatusCode, String);

fn internal_error(e: impl std::fmt::Debug) -> ApiError {
    tracing::error!(error = ?e, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Request failed: {e:?}"),
    )
}

/// Run the HTTP API server until the process is stopped.
pub async fn run_server(
    config: ServerConfig,
    store: SqliteDataStore,
    generator: TutorialGenerator<SqliteDataStore, GeminiClient>,
) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.videos_dir).await?;

    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.parse::<HeaderValue>()?)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    let addr = format!("{}:{}", config.host, config.port);

    let state = Arc::new(AppState {
        generator,
        store,
        http_client: reqwest::Client::new(),
        config,
    });

    let app = Router::new()
        .route("/getAccessToken", get(get_access_token))
        .route("/getUserInfo", get(get_user_info))
        .route("/uploadTranscript", post(upload_transcript))
        .route("/uploadVideo", post(upload_video))
        .route("/tutorials", get(get_tutorials))
        .route("/editTutorial", post(edit_tutorial))
        .route("/getVideo", get(get_video))
        // video uploads are far larger than the default body limit
        .layer(DefaultBodyLimit::max(250 * 1024 * 1024))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Listening for tutorial requests");

    axum::serve(listener, app).await?;

    Ok(())
}

// ─── OAuth passthrough ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AccessTokenQuery {
    code: String,
}

async fn get_access_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AccessTokenQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .http_client
        .post("https://github.com/login/oauth/access_token")
        .query(&[
            ("client_id", state.config.github_client_id.as_str()),
            ("client_secret", state.config.github_client_secret.as_str()),
            ("code", query.code.as_str()),
        ])
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(internal_error)?
        .json::<serde_json::Value>()
        .await
        .map_err(internal_error)?;

    Ok(Json(response))
}

#[derive(Deserialize)]
struct UserInfoQuery {
    access_token: String,
}

async fn get_user_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserInfoQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let response = state
        .http_client
        .get("https://api.github.com/user")
        .header(header::ACCEPT, "application/json")
        .header(header::USER_AGENT, "tutorial-forge")
        .bearer_auth(&query.access_token)
        .send()
        .await
        .map_err(internal_error)?
        .json::<serde_json::Value>()
        .await
        .map_err(internal_error)?;

    Ok(Json(response))
}

// ─── Uploads ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UploaderQuery {
    uploader: String,
}

async fn upload_transcript(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploaderQuery>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(internal_error)? {
        if field.name() != Some("transcript") {
            continue;
        }

        tracing::info!(
            file = ?field.file_name(),
            content_type = ?field.content_type(),
            uploader = %query.uploader,
            "Received transcript upload"
        );

        if field.content_type() != Some("application/json") {
            return Err((
                StatusCode::BAD_REQUEST,
                "Invalid file type. Only JSON files are allowed.".into(),
            ));
        }

        let bytes = field.bytes().await.map_err(internal_error)?;
        let transcript = String::from_utf8_lossy(&bytes);

        state
            .generator
            .generate_transcript_tutorial(&transcript, &query.uploader)
            .await
            .map_err(internal_error)?;

        return Ok(StatusCode::OK);
    }

    Err((StatusCode::BAD_REQUEST, "Missing transcript field".into()))
}

async fn upload_video(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploaderQuery>,
    mut multipart: Multipart,
) -> Result<StatusCode, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(internal_error)? {
        if field.name() != Some("video") {
            continue;
        }

        let Some(file_name) = field.file_name().map(sanitize_file_name) else {
            return Err((StatusCode::BAD_REQUEST, "Missing video filename".into()));
        };
        let mime_type = field
            .content_type()
            .unwrap_or("video/mp4")
            .to_string();

        tracing::info!(
            file = %file_name,
            content_type = %mime_type,
            uploader = %query.uploader,
            "Received video upload"
        );

        let bytes = field.bytes().await.map_err(internal_error)?;
        let out_path = state.config.videos_dir.join(&file_name);
        tokio::fs::write(&out_path, &bytes)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Error saving video file"))
            .map_err(internal_error)?;

        // generation runs inline; the request task blocks for the full
        // remote processing wait
        state
            .generator
            .generate_video_tutorial(
                &file_name,
                &mime_type,
                &query.uploader,
                CancellationToken::new(),
            )
            .await
            .map_err(internal_error)?;

        return Ok(StatusCode::OK);
    }

    Err((StatusCode::BAD_REQUEST, "Missing video field".into()))
}

fn sanitize_file_name(name: &str) -> String {
    // strip any client-supplied directory components
    name.rsplit(['/', '\\']).next().unwrap_or(name).to_string()
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TutorialsResponse {
    tutorials: Vec<Tutorial>,
}

async fn get_tutorials(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UploaderQuery>,
) -> Result<Json<TutorialsResponse>, ApiError> {
    let tutorials = state
        .store
        .select_tutorials(&query.uploader)
        .await
        .map_err(internal_error)?;

    Ok(Json(TutorialsResponse { tutorials }))
}

async fn edit_tutorial(
    State(state): State<Arc<AppState>>,
    Json(tutorial): Json<Tutorial>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .update_tutorial_content(tutorial.id, &tutorial.content)
        .await
        .map_err(internal_error)?;

    Ok(StatusCode::OK)
}

// ─── Stored video playback ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct VideoQuery {
    video_name: String,
}

async fn get_video(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let file_name = sanitize_file_name(&query.video_name);
    let video_path = state.config.videos_dir.join(&file_name);

    match tokio::fs::read(&video_path).await {
        Ok(bytes) => Ok(([(header::CONTENT_TYPE, "video/mp4")], bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err((StatusCode::NOT_FOUND, "Video not found".into()))
        }
        Err(e) => Err(internal_error(e)),
    }
}
