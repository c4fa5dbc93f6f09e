use crate::config::ConfigError;
use crate::costing::{CostModel, TravelMode};
use log::debug;
use std::sync::Arc;
use strum::EnumCount;

/// Associates each travel mode with at most one named costing model.
#[derive(Debug, Default)]
pub struct ModeRegistry {
    costings: [Option<Arc<dyn CostModel>>; TravelMode::COUNT],
    names: [Option<String>; TravelMode::COUNT],
}

impl ModeRegistry {
    /// Registers `costing` under `name`, for the travel mode it reports.
    ///
    /// Fails if a costing is already registered for that travel mode.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        costing: Arc<dyn CostModel>,
    ) -> Result<TravelMode, ConfigError> {
        let mode = costing.travel_mode();
        let index = mode.index();

        if self.costings[index].is_some() {
            return Err(ConfigError::DuplicateTravelMode(mode));
        }

        let name = name.into();
        debug!("Registered costing {name} for travel mode {mode}");

        self.costings[index] = Some(costing);
        self.names[index] = Some(name);
        Ok(mode)
    }

    pub fn name_to_travel_mode(&self, name: &str) -> Result<TravelMode, ConfigError> {
        self.names
            .iter()
            .position(|registered| !name.is_empty() && registered.as_deref() == Some(name))
            .and_then(|index| TravelMode::from_repr(index as u8))
            .ok_or_else(|| ConfigError::InvalidCostingName(name.to_string()))
    }

    pub fn travel_mode_to_name(&self, mode: TravelMode) -> Result<&str, ConfigError> {
        self.names[mode.index()]
            .as_deref()
            .ok_or(ConfigError::UnregisteredTravelMode(mode))
    }

    pub fn costing(&self, mode: TravelMode) -> Result<Arc<dyn CostModel>, ConfigError> {
        self.costings[mode.index()]
            .clone()
            .ok_or(ConfigError::UnregisteredTravelMode(mode))
    }

    /// Iterates the registered names alongside their travel modes.
    pub fn modes(&self) -> impl Iterator<Item = (TravelMode, &str)> {
        self.names.iter().enumerate().filter_map(|(index, name)| {
            let mode = TravelMode::from_repr(index as u8)?;
            name.as_deref().map(|name| (mode, name))
        })
    }
}
