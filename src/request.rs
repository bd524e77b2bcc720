use crate::error::{AppError, InvalidRequestReason};
use crate::lift::{FloorParseError, FloorRequest, parse_floor, split_marker};

/// Raw requests that ask to leave the shaft, rejected before any parsing.
const IMPOSSIBLE_REQUESTS: [&str; 2] = ["0D", "20U"];

/// Validates a floor request encoding such as `"17D"` or `"5U"`.
///
/// Rules are checked in order and the first violation wins: impossible
/// boundary request, missing direction marker, non-integer floor, floor out
/// of range.
pub fn validate_request(raw: &str) -> Result<FloorRequest, AppError> {
    Ok(check_request(raw)?)
}

pub(crate) fn check_request(raw: &str) -> Result<FloorRequest, InvalidRequestReason> {
    if IMPOSSIBLE_REQUESTS.contains(&raw) {
        return Err(InvalidRequestReason::ImpossibleBoundary);
    }
    let (prefix, marker) = split_marker(raw);
    let direction = marker.ok_or(InvalidRequestReason::MissingDirection)?;
    let floor = parse_floor(prefix).map_err(|err| match err {
        FloorParseError::NotInteger => InvalidRequestReason::FloorNotInteger,
        FloorParseError::OutOfRange => InvalidRequestReason::FloorOutOfRange,
    })?;
    // "00D" and friends get past the literal check above
    FloorRequest::new(floor, direction)
}
