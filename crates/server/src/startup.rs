use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::storage::student_list::StudentListStore;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Which of the two student services a process hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    /// Database-backed, `/api/students`.
    Persistent,
    /// Process-local list, `/students`.
    Ephemeral,
}

impl ServiceKind {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceKind::Persistent => "persistent-server",
            ServiceKind::Ephemeral => "ephemeral-server",
        }
    }

    fn server_config<'a>(&self, cfg: &'a AppConfig) -> &'a ServerConfig {
        match self {
            ServiceKind::Persistent => &cfg.server,
            ServiceKind::Ephemeral => &cfg.ephemeral,
        }
    }
}

/// Any origin, method and header.
pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

async fn serve(addr: SocketAddr, app: Router, service: &'static str) -> anyhow::Result<()> {
    info!(%addr, service, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Connect the store, ensure the schema, and serve `/api/students`.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let mut db_cfg = cfg.database.clone();
    if db_cfg.url.trim().is_empty() {
        db_cfg.url = models::db::DATABASE_URL.clone();
    }
    db_cfg
        .validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;

    let db = models::db::connect_with_config(&db_cfg).await?;
    models::db::ensure_schema(&db).await?;

    let api_docs = common::env::is_development();
    if api_docs {
        info!("serving API docs at /swagger-ui");
    }
    let app = routes::build_router(ServerState::new(db), build_cors(), api_docs);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    serve(addr, app, ServiceKind::Persistent.name()).await
}

/// Serve `/students` from an empty in-memory list.
pub async fn run_ephemeral(cfg: AppConfig) -> anyhow::Result<()> {
    let app = routes::build_memory_router(StudentListStore::new());
    let addr: SocketAddr = cfg.ephemeral.bind_addr().parse()?;
    serve(addr, app, ServiceKind::Ephemeral.name()).await
}

/// Build the tokio runtime for `kind`, run its server and stop on Ctrl+C.
/// Logging must already be initialized.
pub fn launch(kind: ServiceKind) -> std::process::ExitCode {
    let service = kind.name();
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    // worker threads: config section first, then TOKIO_WORKER_THREADS
    let worker_threads = kind.server_config(&cfg).worker_threads.or_else(|| {
        std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok())
    });

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "service starting"
    );

    rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            let res = match kind {
                ServiceKind::Persistent => run(cfg).await,
                ServiceKind::Ephemeral => run_ephemeral(cfg).await,
            };
            if let Err(e) = &res {
                error!(service, event = "run_failed", error = %e, "server returned error");
            }
            res
        });

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service, event = "stop", %service_id, pid, "server stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    // already logged inside the task
                    Ok(Err(_)) => std::process::ExitCode::FAILURE,
                    Err(e) => {
                        error!(service, event = "task_join_error", error = %e, "server task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                warn!(service, event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
