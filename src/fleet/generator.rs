//! Random lift positions for simulation ticks and demos.

use crate::lift::{Direction, Floor, LiftState};
use rand::Rng;
use rand::distributions::Standard;

/// Number of lifts in the simulated building unless configured otherwise.
pub const DEFAULT_FLEET_SIZE: usize = 5;

const AT_GROUND: [Direction; 2] = [Direction::Stationary, Direction::Up];
const AT_TOP: [Direction; 2] = [Direction::Stationary, Direction::Down];

/// Picks a uniformly random floor and a direction the lift could actually
/// be moving in from there.
pub fn generate_lift_state<R: Rng + ?Sized>(rng: &mut R) -> LiftState {
    let floor: Floor = rng.sample(Standard);
    let choices: &[Direction] = match floor {
        Floor::GROUND => &AT_GROUND,
        Floor::TOP => &AT_TOP,
        _ => &Direction::ALL,
    };
    let direction = choices[rng.gen_range(0..choices.len())];
    LiftState::new(floor, direction)
}

pub fn generate_fleet<R: Rng + ?Sized>(how_many: usize, rng: &mut R) -> Vec<LiftState> {
    (0..how_many).map(|_| generate_lift_state(rng)).collect()
}
