use dotenvy::dotenv;
use tracing::info;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service = "ephemeral-server", event = "logger_init", "tracing subscriber initialized");
}

/// Student list lives only in this process; a restart starts empty.
fn main() -> std::process::ExitCode {
    init_logging();
    server::launch(server::ServiceKind::Ephemeral)
}
