use lift_dispatch::error::{AppError, InvalidRequestReason};
use lift_dispatch::fleet::{fleet_rng, refresh_fleet};
use lift_dispatch::state::AppState;
use lift_dispatch::{
    Direction, LiftState, decode_lift_state, estimate_fleet, select_best, validate_request,
    wait_time,
};
use std::sync::{Arc, RwLock};

#[test]
fn pipeline_dispatches_request_against_decoded_fleet() -> Result<(), Box<dyn std::error::Error>> {
    let fleet = ["0", "1D", "12", "4U", "19D"]
        .iter()
        .map(|raw| decode_lift_state(raw))
        .collect::<Result<Vec<LiftState>, _>>()?;
    let request = validate_request("17D")?;

    let dispatch = estimate_fleet(&fleet, request)?;

    assert_eq!(dispatch.wait_times(), &[17, 18, 5, 13, 2]);
    assert_eq!(select_best(&fleet, request)?, 4);
    assert_eq!(fleet[4].direction, Direction::Down);
    Ok(())
}

#[test]
fn pipeline_dispatches_against_refreshed_snapshot() -> Result<(), AppError> {
    let state = Arc::new(RwLock::new(AppState::new()));
    let _fleet_rx = {
        let guard = state.read().map_err(|_| AppError::StateLock)?;
        guard.subscribe_fleet()
    };
    let mut rng = fleet_rng(Some(2026));

    let snapshot = refresh_fleet(&state, 5, &mut rng)?;
    let request = validate_request("5U")?;
    let dispatch = estimate_fleet(&snapshot.lifts, request)?;

    let best = dispatch.selected_wait_time();
    let expected = snapshot
        .lifts
        .iter()
        .map(|lift| wait_time(*lift, request))
        .min();
    assert_eq!(Some(best), expected);
    assert!(
        dispatch.wait_times()[..dispatch.selected()]
            .iter()
            .all(|units| *units > best)
    );
    Ok(())
}

#[test]
fn pipeline_surfaces_request_and_fleet_errors() {
    assert!(matches!(
        validate_request("21U"),
        Err(AppError::InvalidRequest(InvalidRequestReason::FloorOutOfRange))
    ));
    assert!(matches!(
        validate_request("0D"),
        Err(AppError::InvalidRequest(InvalidRequestReason::ImpossibleBoundary))
    ));

    let request = validate_request("3D").expect("valid request");
    assert!(matches!(select_best(&[], request), Err(AppError::EmptyFleet)));
}
