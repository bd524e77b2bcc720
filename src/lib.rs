pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fleet;
pub mod lift;
pub mod request;
pub mod state;

pub use dispatch::{Dispatch, estimate_fleet, select_best, wait_time};
pub use error::{AppError, InvalidRequestReason};
pub use lift::{Direction, Floor, FloorRequest, LiftState, TravelDirection, decode_lift_state};
pub use request::validate_request;
