use crate::costing::TravelMode;
use crate::impl_err;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("expected sigma_z to be positive, got {0}")]
    SigmaZ(f64),

    #[error("expected beta to be positive, got {0}")]
    Beta(f64),

    #[error("expected search radius to be non-negative, got {0}")]
    SearchRadius(f64),

    #[error("expected turn penalty factor to be non-negative, got {0}")]
    TurnPenaltyFactor(f64),

    #[error("expected grid size to be positive")]
    GridSize,

    #[error("expected grid cell size to be finite and positive, got {0}")]
    CellSize(f64),

    #[error("grid would exceed {0} cells per partition")]
    GridCells(usize),

    #[error("found duplicate travel mode {0}")]
    DuplicateTravelMode(TravelMode),

    #[error("invalid costing name: {0}")]
    InvalidCostingName(String),

    #[error("no costing registered for travel mode {0}")]
    UnregisteredTravelMode(TravelMode),

    #[error("could not parse configuration: {0}")]
    Parse(serde_json::Error),
}

impl_err!(serde_json::Error, ConfigError, Parse);
