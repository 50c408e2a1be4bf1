use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use maintenance_advisor::config::AppConfig;
use maintenance_advisor::error::AppError;
use maintenance_advisor::telemetry;
use maintenance_advisor::workflows::maintenance::assignment::{
    roster, Candidate, MaintenanceRequest, Priority, RequestId, RequestStatus, Suggestion,
    SuggestionRanker,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Maintenance Assignment Advisor",
    about = "Rank and commit maintenance request assignments from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assignment advisory utilities
    Assignment {
        #[command(subcommand)]
        command: AssignmentCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum AssignmentCommand {
    /// Rank a candidate roster for a hypothetical maintenance request
    Rank(RankArgs),
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Candidate roster CSV export
    #[arg(long)]
    roster: PathBuf,
    /// Maintenance category of the request (e.g. plumbing, electrical)
    #[arg(long)]
    category: String,
    /// Request priority
    #[arg(long, default_value = "normal", value_parser = parse_priority)]
    priority: Priority,
    /// Property reference for the request
    #[arg(long, default_value = "demo-property")]
    property: String,
    /// Location tag of the property; repeat for several tags
    #[arg(long = "location-tag")]
    location_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RankRequest {
    category: String,
    #[serde(default, deserialize_with = "deserialize_optional_priority")]
    priority: Option<Priority>,
    #[serde(default)]
    property_id: Option<String>,
    #[serde(default)]
    location_tags: BTreeSet<String>,
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    roster_csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    category: String,
    priority: &'static str,
    pool_size: usize,
    suggestions: Vec<Suggestion>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assignment {
            command: AssignmentCommand::Rank(args),
        } => run_rank(args),
    }
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse_label(raw).ok_or_else(|| {
        format!("'{raw}' is not a priority (expected low, normal, urgent, or emergency)")
    })
}

fn deserialize_optional_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_priority(&value).map_err(serde::de::Error::custom))
        .transpose()
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/maintenance/assignment/rank", post(rank_endpoint))
        .layer(prometheus_layer)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "maintenance assignment advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        roster,
        category,
        priority,
        property,
        location_tags,
    } = args;

    let candidates = roster::candidates_from_path(roster)?;
    let request = demo_request(&category, priority, &property, location_tags);

    let ranker = SuggestionRanker::default();
    let suggestions = ranker.rank(&request, &candidates);

    render_suggestions(&request, candidates.len(), &suggestions);
    Ok(())
}

fn demo_request(
    category: &str,
    priority: Priority,
    property: &str,
    location_tags: Vec<String>,
) -> MaintenanceRequest {
    MaintenanceRequest {
        id: RequestId("demo-request".to_string()),
        category: category.trim().to_ascii_lowercase(),
        priority,
        status: RequestStatus::Approved,
        property_id: property.to_string(),
        unit_id: None,
        location_tags: location_tags
            .into_iter()
            .map(|tag| tag.trim().to_ascii_lowercase())
            .collect(),
        reported_on: Local::now().date_naive(),
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Stateless advisory endpoint: the caller supplies the request shape and the
/// candidate pool (parsed, or as a raw roster CSV export) and gets the ranking
/// back without any state transition.
async fn rank_endpoint(Json(payload): Json<RankRequest>) -> Result<Json<RankResponse>, AppError> {
    let RankRequest {
        category,
        priority,
        property_id,
        location_tags,
        candidates,
        roster_csv,
    } = payload;

    let mut pool = candidates.unwrap_or_default();
    if let Some(csv_text) = roster_csv {
        let reader = Cursor::new(csv_text.into_bytes());
        pool.extend(roster::candidates_from_reader(reader)?);
    }

    let priority = priority.unwrap_or(Priority::Normal);
    let request = demo_request(
        &category,
        priority,
        property_id.as_deref().unwrap_or("demo-property"),
        location_tags.into_iter().collect(),
    );

    let ranker = SuggestionRanker::default();
    let suggestions = ranker.rank(&request, &pool);

    Ok(Json(RankResponse {
        category: request.category,
        priority: priority.label(),
        pool_size: pool.len(),
        suggestions,
    }))
}

fn render_suggestions(request: &MaintenanceRequest, pool_size: usize, suggestions: &[Suggestion]) {
    println!("Assignment advisory");
    println!(
        "Request: category {}, priority {}, property {}",
        request.category,
        request.priority.label(),
        request.property_id
    );
    println!("Candidate pool: {pool_size} supplied");

    if suggestions.is_empty() {
        println!("\nNo available candidates; fall back to manual assignment.");
        return;
    }

    println!("\nRanked suggestions");
    for (rank, suggestion) in suggestions.iter().enumerate() {
        println!(
            "{:>2}. {} [{}] score {} ({} open) - {}",
            rank + 1,
            suggestion.name,
            suggestion.candidate_type.label(),
            suggestion.score,
            suggestion.current_assignment_count,
            suggestion.reasons.join(", ")
        );
    }
}
