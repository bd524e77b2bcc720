use crate::error::AppError;
use crate::state::{AppState, FleetSnapshot};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

pub mod generator;

pub use generator::{DEFAULT_FLEET_SIZE, generate_fleet, generate_lift_state};

/// Replaces the current snapshot with freshly generated lift positions.
pub fn refresh_fleet<R: Rng + ?Sized>(
    state: &Arc<RwLock<AppState>>,
    size: usize,
    rng: &mut R,
) -> Result<FleetSnapshot, AppError> {
    refresh_fleet_at(state, size, rng, SystemTime::now())
}

fn refresh_fleet_at<R: Rng + ?Sized>(
    state: &Arc<RwLock<AppState>>,
    size: usize,
    rng: &mut R,
    timestamp: SystemTime,
) -> Result<FleetSnapshot, AppError> {
    let snapshot = FleetSnapshot {
        lifts: generate_fleet(size, rng),
        timestamp,
    };

    if snapshot.lifts.is_empty() {
        warn!("Fleet snapshot has no lifts");
    }

    let mut guard = state.write().map_err(|_| AppError::StateLock)?;
    guard.set_fleet(snapshot.clone())?;

    Ok(snapshot)
}

/// Builds the snapshot RNG, seeded when reproducible runs are wanted.
pub fn fleet_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

pub fn spawn_refresh_thread(
    state: Arc<RwLock<AppState>>,
    size: usize,
    mut rng: StdRng,
    interval: Duration,
    stop: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let cycle_start = Instant::now();

            match refresh_fleet(&state, size, &mut rng) {
                Ok(snapshot) => {
                    let lifts: Vec<String> =
                        snapshot.lifts.iter().map(ToString::to_string).collect();
                    debug!(?lifts, "Fleet snapshot refreshed");
                }
                Err(e) => warn!("Error refreshing fleet: {}", e),
            }

            sleep_with_stop(interval, &stop, cycle_start);
        }
    })
}

fn sleep_with_stop(duration: Duration, stop: &AtomicBool, start: Instant) {
    let elapsed = start.elapsed();
    if elapsed >= duration {
        return;
    }
    let remaining = duration - elapsed;
    let step = Duration::from_millis(100).min(remaining);
    let mut slept = Duration::ZERO;

    while slept < remaining {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        std::thread::sleep(step);
        slept += step;
    }
}
