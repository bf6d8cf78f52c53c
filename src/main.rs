use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use person_intake::config::{AppConfig, SessionConfig};
use person_intake::error::AppError;
use person_intake::intake::{
    person_router, IntakeError, PersonIntakeService, PersonSubmission, SqlitePersonRepository,
};
use person_intake::telemetry;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    session: SessionConfig,
}

#[derive(Parser, Debug)]
#[command(
    name = "Person Intake Service",
    about = "Run the person intake HTTP service or manage records from the command line",
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
    /// Inspect or extend the person store from the command line
    People {
        #[command(subcommand)]
        command: PeopleCommand,
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
enum PeopleCommand {
    /// Validate and store one person record
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },
    /// Print every stored record in insertion order
    List,
    /// Print records whose first name matches exactly
    Search { name: String },
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
        Command::People { command } => run_people(command),
    }
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
        session: config.session.clone(),
    };

    let repository = Arc::new(SqlitePersonRepository::open(&config.database.path)?);
    let service = Arc::new(PersonIntakeService::new(repository));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/session", get(session_endpoint))
        .route("/home", get(home_endpoint))
        .with_state(state)
        .merge(person_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "person intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_people(command: PeopleCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let repository = Arc::new(SqlitePersonRepository::open(&config.database.path)?);
    let service = PersonIntakeService::new(repository);

    match command {
        PeopleCommand::Add {
            first_name,
            last_name,
            email,
        } => {
            let submission = PersonSubmission {
                first_name,
                last_name,
                email,
            };
            match service.submit(submission) {
                Ok(record) => {
                    println!("Stored #{}: {}", record.id.0, record.display_line());
                    Ok(())
                }
                Err(IntakeError::Rejected(violations)) => {
                    println!("Submission rejected:");
                    for violation in violations {
                        println!("- {}: {}", violation.field.label(), violation.message);
                    }
                    Ok(())
                }
                Err(IntakeError::Repository(err)) => Err(err.into()),
            }
        }
        PeopleCommand::List => {
            let people = storage_result(service.list())?;
            if people.is_empty() {
                println!("No records found");
            } else {
                for record in people {
                    println!("{} - {}", record.id.0, record.display_line());
                }
            }
            Ok(())
        }
        PeopleCommand::Search { name } => {
            let matches = storage_result(service.find_by_first_name(&name))?;
            if matches.is_empty() {
                println!("No records found");
            } else {
                for record in matches {
                    println!("{}", record.display_line());
                }
            }
            Ok(())
        }
    }
}

fn storage_result<T>(result: Result<T, IntakeError>) -> Result<T, AppError> {
    result.map_err(|err| match err {
        IntakeError::Repository(err) => err.into(),
        // list/search never reject input.
        IntakeError::Rejected(violations) => person_intake::intake::RepositoryError::Corrupt(
            format!("unexpected rejection: {violations:?}"),
        )
        .into(),
    })
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

async fn session_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = state.session.cookie("demo");
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        "Session cookie set; inspect its attributes in browser devtools.",
    )
}

async fn home_endpoint() -> &'static str {
    "Welcome to the Home Page"
}

#[cfg(test)]
mod tests {
    use super::*;
    use person_intake::config::AppEnvironment;

    fn test_state(ready: bool, environment: AppEnvironment) -> AppState {
        // build_recorder avoids installing a global recorder per test.
        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: handle,
            session: SessionConfig::for_environment(environment),
        }
    }

    #[tokio::test]
    async fn session_endpoint_sets_hardened_cookie() {
        let state = test_state(true, AppEnvironment::Development);

        let response = session_endpoint(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("cookie header present")
            .to_str()
            .expect("cookie is ascii");
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn readiness_endpoint_reports_initializing_until_flagged() {
        let state = test_state(false, AppEnvironment::Test);

        let response = readiness_endpoint(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
