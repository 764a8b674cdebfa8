use std::process::ExitCode;

use pg_bootstrap::config::{ProcessEnv, Settings};
use pg_bootstrap::shutdown::{listen_for_os_signals, ShutdownSignal};
use pg_bootstrap::telemetry::init_telemetry;
use pg_bootstrap::{bootstrap, BootstrapError};

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            let err = BootstrapError::from(e);
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // Initialize tracing
    let _telemetry = match init_telemetry(&settings.log, &settings.otel) {
        Ok(guard) => guard,
        Err(e) => {
            let err = BootstrapError::from(e);
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    match run(&settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(
                error = %e,
                exit_code = e.exit_code(),
                configuration = e.is_configuration(),
                "Database bootstrap failed"
            );
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(settings: &Settings) -> Result<(), BootstrapError> {
    let shutdown = ShutdownSignal::new();
    let mut shutdown_rx = shutdown.subscribe();
    let signal_handle = tokio::spawn(listen_for_os_signals(shutdown.clone()));

    let result = bootstrap(&ProcessEnv, &settings.database, &mut shutdown_rx).await;
    signal_handle.abort();

    let pool = result?;
    tracing::info!(
        connections = pool.size(),
        "Database is accepting connections"
    );

    pool.close().await;
    tracing::info!("PostgreSQL connection pool closed");
    Ok(())
}
