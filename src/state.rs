use crate::error::AppError;
use crate::lift::LiftState;
use std::time::SystemTime;
use tokio::sync::watch;

/// The lift positions observed at one simulation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub lifts: Vec<LiftState>,
    pub timestamp: SystemTime,
}

#[derive(Debug)]
pub struct AppState {
    fleet: Option<FleetSnapshot>,
    fleet_tx: watch::Sender<Option<FleetSnapshot>>,
}

impl AppState {
    pub fn new() -> Self {
        let (fleet_tx, _fleet_rx) = watch::channel(None);
        Self {
            fleet: None,
            fleet_tx,
        }
    }

    pub fn fleet(&self) -> Option<&FleetSnapshot> {
        self.fleet.as_ref()
    }

    pub fn subscribe_fleet(&self) -> watch::Receiver<Option<FleetSnapshot>> {
        self.fleet_tx.subscribe()
    }

    pub fn set_fleet(&mut self, fleet: FleetSnapshot) -> Result<(), AppError> {
        self.fleet = Some(fleet.clone());
        self.fleet_tx
            .send(Some(fleet))
            .map_err(|_| AppError::WatchSend)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lift::decode_lift_state;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn set_fleet_updates_state_and_watch() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = AppState::new();
        let receiver = state.subscribe_fleet();
        let snapshot = FleetSnapshot {
            lifts: vec![decode_lift_state("4U")?, decode_lift_state("19D")?],
            timestamp: UNIX_EPOCH + Duration::from_secs(3),
        };

        state.set_fleet(snapshot.clone())?;

        assert_eq!(state.fleet(), Some(&snapshot));
        assert_eq!(*receiver.borrow(), Some(snapshot));
        Ok(())
    }

    #[test]
    fn set_fleet_without_subscribers_reports_watch_error() {
        let mut state = AppState::new();
        let snapshot = FleetSnapshot {
            lifts: Vec::new(),
            timestamp: UNIX_EPOCH,
        };

        let result = state.set_fleet(snapshot.clone());

        assert!(matches!(result, Err(AppError::WatchSend)));
        assert_eq!(state.fleet(), Some(&snapshot));
    }
}
