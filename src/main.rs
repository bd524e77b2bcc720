use lift_dispatch::{api, config, fleet, state};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::Level;

fn init_tracing(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_default()?;
    init_tracing(config.log_level().unwrap_or(Level::INFO));
    if config.log_level().is_none() {
        tracing::warn!(level = %config.logging.level, "Unknown log level, using info");
    }
    tracing::info!(
        config_path = config::DEFAULT_CONFIG_PATH,
        app = %config.app.name,
        "lift-dispatch starting"
    );

    let mut rng = fleet::fleet_rng(config.fleet_seed());

    if let Some(raw_request) = std::env::args().nth(1) {
        return run_once(&raw_request, config.fleet_size(), &mut rng);
    }

    let state = Arc::new(RwLock::new(state::AppState::new()));
    let _fleet_rx = match state.read() {
        Ok(guard) => guard.subscribe_fleet(),
        Err(_) => return Err(lift_dispatch::AppError::StateLock.into()),
    };

    let stop_flag = Arc::new(AtomicBool::new(false));
    let refresh_interval = config.refresh_interval();
    tracing::info!(
        lifts = config.fleet_size(),
        interval_ms = refresh_interval.as_millis(),
        "Starting fleet refresh thread"
    );
    let _refresh_handle = fleet::spawn_refresh_thread(
        Arc::clone(&state),
        config.fleet_size(),
        rng,
        refresh_interval,
        Arc::clone(&stop_flag),
    );

    let app = api::router(Arc::clone(&state));
    let port = config.server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;

    stop_flag.store(true, Ordering::Relaxed);

    Ok(())
}

const USAGE: &str = "usage: lift-dispatch [REQUEST]

  REQUEST  floor 0-20 followed by U or D, e.g. 17D
           without REQUEST the dispatch API server starts";

/// Dispatches a single request against a freshly generated fleet and prints the outcome.
fn run_once(
    raw_request: &str,
    fleet_size: usize,
    rng: &mut rand::rngs::StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(raw_request, "-h" | "--help") {
        println!("{USAGE}");
        return Ok(());
    }
    let request = match lift_dispatch::validate_request(raw_request) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return Err(err.into());
        }
    };
    let lifts = fleet::generate_fleet(fleet_size, rng);
    let dispatch = lift_dispatch::estimate_fleet(&lifts, request)?;

    let positions: Vec<String> = lifts.iter().map(ToString::to_string).collect();
    println!("Lift positions: {positions:?}");
    println!("Lift request: {request}");
    println!("Waiting times: {:?}", dispatch.wait_times());
    println!("Closest lift: #{}", dispatch.selected() + 1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_toml() -> Result<(), Box<dyn std::error::Error>> {
        let _config = config::load_default()?;
        Ok(())
    }

    #[test]
    fn run_once_rejects_invalid_request() {
        let mut rng = fleet::fleet_rng(Some(3));

        assert!(run_once("0D", 5, &mut rng).is_err());
        assert!(run_once("12U", 0, &mut rng).is_err());
        assert!(run_once("12U", 5, &mut rng).is_ok());
    }

    #[test]
    fn run_once_prints_usage_for_help_flags() {
        let mut rng = fleet::fleet_rng(Some(3));

        assert!(run_once("--help", 5, &mut rng).is_ok());
        assert!(run_once("-h", 0, &mut rng).is_ok());
        assert!(matches!(
            run_once("--verbose", 5, &mut rng)
                .map_err(|err| err.downcast::<lift_dispatch::AppError>().ok()),
            Err(Some(err)) if matches!(*err, lift_dispatch::AppError::InvalidRequest(_))
        ));
    }
}
