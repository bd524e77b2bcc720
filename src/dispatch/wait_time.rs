use crate::lift::{Direction, FloorRequest, LiftState, TOP_FLOOR};
use std::cmp::Ordering;

/// Upper bound on a wait: two full traversals of the shaft.
pub const MAX_WAIT_UNITS: u8 = 2 * TOP_FLOOR;

/// Units of time until `lift` reaches the requested floor.
///
/// A lift heading away from the requester finishes its leg at the top or
/// ground floor before turning back. The requested travel direction does not
/// affect the result.
pub fn wait_time(lift: LiftState, request: FloorRequest) -> u8 {
    let current = lift.floor.number();
    let requested = request.floor().number();

    match (lift.direction, current.cmp(&requested)) {
        (Direction::Stationary, _) => current.abs_diff(requested),
        (Direction::Up, Ordering::Less) => requested - current,
        (Direction::Down, Ordering::Greater) => current - requested,
        (Direction::Up, Ordering::Equal | Ordering::Greater) => {
            (TOP_FLOOR - current) + (TOP_FLOOR - requested)
        }
        (Direction::Down, Ordering::Equal | Ordering::Less) => current + requested,
    }
}
