use crate::error::AppError;
use crate::lift::{FloorRequest, LiftState};
use tracing::debug;

pub mod wait_time;

pub use wait_time::{MAX_WAIT_UNITS, wait_time};

/// Wait times for a whole fleet and the lift chosen to answer the request.
///
/// Only built by [`estimate_fleet`], so `selected` always indexes `wait_times`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    wait_times: Vec<u8>,
    selected: usize,
}

impl Dispatch {
    /// One entry per lift, in fleet order.
    pub fn wait_times(&self) -> &[u8] {
        &self.wait_times
    }

    /// Index of the first lift with the smallest wait time.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_wait_time(&self) -> u8 {
        self.wait_times[self.selected]
    }

    pub fn into_wait_times(self) -> Vec<u8> {
        self.wait_times
    }
}

/// Computes every lift's wait time and picks the earliest minimum.
pub fn estimate_fleet(fleet: &[LiftState], request: FloorRequest) -> Result<Dispatch, AppError> {
    if fleet.is_empty() {
        return Err(AppError::EmptyFleet);
    }

    let wait_times: Vec<u8> = fleet.iter().map(|lift| wait_time(*lift, request)).collect();
    let selected = first_minimum(&wait_times)
        .ok_or(AppError::InternalInvariant("no minimum wait time in a non-empty fleet"))?;

    debug!(
        request = %request,
        lifts = fleet.len(),
        selected,
        wait_time = wait_times[selected],
        "Dispatch estimated"
    );

    Ok(Dispatch {
        wait_times,
        selected,
    })
}

/// Index of the lift that reaches `request` soonest, ties going to the lower index.
pub fn select_best(fleet: &[LiftState], request: FloorRequest) -> Result<usize, AppError> {
    estimate_fleet(fleet, request).map(|dispatch| dispatch.selected())
}

fn first_minimum(values: &[u8]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, value)| **value)
        .map(|(index, _)| index)
}
