//! Lift and request types plus their compact string encodings.
//!
//! A lift state is encoded as a floor number optionally followed by `U` or `D`
//! (`"12D"`, `"0"`, `"4U"`). A floor request always carries the marker
//! (`"17D"`). Encodings are only handled here; everything else works on the
//! structured types.

use crate::error::InvalidRequestReason;
use rand::Rng;
use rand::distributions::{Distribution, Standard};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use thiserror::Error;

pub const GROUND_FLOOR: u8 = 0;
pub const TOP_FLOOR: u8 = 20;

/// A floor in `[GROUND_FLOOR, TOP_FLOOR]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Floor(u8);

impl Floor {
    pub const GROUND: Floor = Floor(GROUND_FLOOR);
    pub const TOP: Floor = Floor(TOP_FLOOR);

    pub fn new(number: u8) -> Option<Self> {
        if number <= TOP_FLOOR {
            Some(Self(number))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Every floor from ground to top.
    pub fn all() -> impl Iterator<Item = Floor> {
        (GROUND_FLOOR..=TOP_FLOOR).map(Floor)
    }
}

/// Uniform over every floor in the shaft.
impl Distribution<Floor> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Floor {
        Floor(rng.gen_range(GROUND_FLOOR..=TOP_FLOOR))
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Stationary,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Stationary, Direction::Up, Direction::Down];

    fn marker(self) -> &'static str {
        match self {
            Direction::Stationary => "",
            Direction::Up => "U",
            Direction::Down => "D",
        }
    }
}

/// Direction a passenger wants to travel. A request is never stationary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelDirection {
    Up,
    Down,
}

impl From<TravelDirection> for Direction {
    fn from(direction: TravelDirection) -> Self {
        match direction {
            TravelDirection::Up => Direction::Up,
            TravelDirection::Down => Direction::Down,
        }
    }
}

/// Snapshot of one lift's position and motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiftState {
    pub floor: Floor,
    pub direction: Direction,
}

impl LiftState {
    pub fn new(floor: Floor, direction: Direction) -> Self {
        Self { floor, direction }
    }
}

impl fmt::Display for LiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.floor, self.direction.marker())
    }
}

impl FromStr for LiftState {
    type Err = DecodeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        decode_lift_state(raw)
    }
}

/// A validated request for a lift at `floor`, travelling in `direction`.
///
/// Floor 0 going down and floor 20 going up cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorRequest {
    floor: Floor,
    direction: TravelDirection,
}

impl FloorRequest {
    pub fn new(floor: Floor, direction: TravelDirection) -> Result<Self, InvalidRequestReason> {
        match (floor, direction) {
            (Floor::GROUND, TravelDirection::Down) | (Floor::TOP, TravelDirection::Up) => {
                Err(InvalidRequestReason::ImpossibleDirection)
            }
            _ => Ok(Self { floor, direction }),
        }
    }

    pub fn floor(&self) -> Floor {
        self.floor
    }

    pub fn direction(&self) -> TravelDirection {
        self.direction
    }
}

impl fmt::Display for FloorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.floor,
            Direction::from(self.direction).marker()
        )
    }
}

impl FromStr for FloorRequest {
    type Err = InvalidRequestReason;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        crate::request::check_request(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("floor is not an integer: {0:?}")]
    NotInteger(String),
    #[error("floor out of range 0-20: {0:?}")]
    OutOfRange(String),
}

/// Decodes a lift state encoding.
///
/// A trailing `U` or `D` sets the direction and the rest must be the floor;
/// anything else means the whole string is the floor of a stationary lift.
/// Infeasible states such as `"0D"` decode as written.
pub fn decode_lift_state(raw: &str) -> Result<LiftState, DecodeError> {
    let (prefix, marker) = split_marker(raw);
    let direction = match marker {
        Some(direction) => Direction::from(direction),
        None => Direction::Stationary,
    };
    let floor = parse_floor(prefix).map_err(|err| match err {
        FloorParseError::NotInteger => DecodeError::NotInteger(raw.to_string()),
        FloorParseError::OutOfRange => DecodeError::OutOfRange(raw.to_string()),
    })?;
    Ok(LiftState::new(floor, direction))
}

/// Splits a trailing direction marker off an encoding.
///
/// Returns the whole string and `None` when the last character is not a marker.
pub(crate) fn split_marker(raw: &str) -> (&str, Option<TravelDirection>) {
    match raw.chars().last() {
        Some('U') => (&raw[..raw.len() - 1], Some(TravelDirection::Up)),
        Some('D') => (&raw[..raw.len() - 1], Some(TravelDirection::Down)),
        _ => (raw, None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloorParseError {
    NotInteger,
    OutOfRange,
}

/// Parses a signed integer floor number, ignoring surrounding whitespace.
/// Integers too large for `i64` are out of range rather than malformed.
pub(crate) fn parse_floor(text: &str) -> Result<Floor, FloorParseError> {
    let number = text.trim().parse::<i64>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => FloorParseError::OutOfRange,
        _ => FloorParseError::NotInteger,
    })?;
    u8::try_from(number)
        .ok()
        .and_then(Floor::new)
        .ok_or(FloorParseError::OutOfRange)
}
