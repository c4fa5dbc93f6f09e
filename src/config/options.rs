use crate::config::ConfigError;
use crate::costing::ProfileOptions;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Parameters of a matching session.
///
/// Distances are in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Standard deviation of the GPS noise, scaling the emission cost.
    pub sigma_z: f64,
    /// Scale of the transition cost.
    pub beta: f64,
    /// Upper bound of the routed distance between two measurements.
    pub breakage_distance: f64,
    /// Bounds the routed distance relative to the great-circle distance
    /// between two measurements.
    pub max_route_distance_factor: f64,
    pub search_radius: f64,
    pub max_search_radius: f64,
    /// Measurements closer than this to the previously matched
    /// measurement are interpolated rather than matched.
    pub interpolation_distance: f64,
    /// Scale of the turn penalty, zero disables turn costs.
    pub turn_penalty_factor: f64,
    pub gps_accuracy: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            sigma_z: 4.07,
            beta: 3.0,
            breakage_distance: 2000.0,
            max_route_distance_factor: 5.0,
            search_radius: 50.0,
            max_search_radius: 100.0,
            interpolation_distance: 10.0,
            turn_penalty_factor: 0.0,
            gps_accuracy: 5.0,
        }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sigma_z.is_nan() || self.sigma_z <= 0.0 {
            return Err(ConfigError::SigmaZ(self.sigma_z));
        }

        if self.beta.is_nan() || self.beta <= 0.0 {
            return Err(ConfigError::Beta(self.beta));
        }

        if self.search_radius.is_nan() || self.search_radius < 0.0 {
            return Err(ConfigError::SearchRadius(self.search_radius));
        }

        if self.turn_penalty_factor.is_nan() || self.turn_penalty_factor < 0.0 {
            return Err(ConfigError::TurnPenaltyFactor(self.turn_penalty_factor));
        }

        Ok(())
    }

    /// The squared candidate search radius, bounded by `max_search_radius`.
    pub fn sq_search_radius(&self) -> f64 {
        let radius = self.search_radius.min(self.max_search_radius);
        radius * radius
    }

    /// Returns these options, overwritten by every preference which is set.
    pub fn overridden(&self, preferences: &MatchPreferences) -> Self {
        let or = |preference: Option<f64>, value: f64| preference.unwrap_or(value);

        Self {
            sigma_z: or(preferences.sigma_z, self.sigma_z),
            beta: or(preferences.beta, self.beta),
            breakage_distance: or(preferences.breakage_distance, self.breakage_distance),
            max_route_distance_factor: or(
                preferences.max_route_distance_factor,
                self.max_route_distance_factor,
            ),
            search_radius: or(preferences.search_radius, self.search_radius),
            max_search_radius: or(preferences.max_search_radius, self.max_search_radius),
            interpolation_distance: or(
                preferences.interpolation_distance,
                self.interpolation_distance,
            ),
            turn_penalty_factor: or(preferences.turn_penalty_factor, self.turn_penalty_factor),
            gps_accuracy: or(preferences.gps_accuracy, self.gps_accuracy),
        }
    }
}

/// A partial set of [`MatchOptions`], alongside the mode to match with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPreferences {
    pub mode: Option<String>,

    pub sigma_z: Option<f64>,
    pub beta: Option<f64>,
    pub breakage_distance: Option<f64>,
    pub max_route_distance_factor: Option<f64>,
    pub search_radius: Option<f64>,
    pub max_search_radius: Option<f64>,
    pub interpolation_distance: Option<f64>,
    pub turn_penalty_factor: Option<f64>,
    pub gps_accuracy: Option<f64>,
}

impl MatchPreferences {
    pub fn with_mode(mode: impl Into<String>) -> Self {
        Self {
            mode: Some(mode.into()),
            ..Self::default()
        }
    }
}

/// Candidate grid configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along each side of a partition.
    pub size: u32,
    /// Number of partition grids retained by
    /// [`crate::MapMatcherFactory::clear_full_cache`].
    pub cache_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 500,
            cache_size: 64,
        }
    }
}

/// Options of the costing profiles registered by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostingConfig {
    pub auto: ProfileOptions,
    pub bicycle: ProfileOptions,
    pub pedestrian: ProfileOptions,
}

/// Configuration of a [`crate::MapMatcherFactory`].
///
/// ### Example
/// ```rust
/// use trellis::config::MatcherConfig;
///
/// let config = MatcherConfig::from_json_str(r#"{
///     "mode": "pedestrian",
///     "default": { "sigma_z": 5.0 },
///     "modes": { "pedestrian": { "search_radius": 25.0 } },
///     "grid": { "size": 100 }
/// }"#).expect("configuration is valid");
///
/// let options = config.merge("pedestrian", &Default::default());
/// assert_eq!(options.sigma_z, 5.0);
/// assert_eq!(options.search_radius, 25.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Name of the mode used when preferences do not name one.
    pub mode: String,
    pub default: MatchOptions,
    /// Per-mode overrides of the defaults.
    pub modes: FxHashMap<String, MatchPreferences>,
    pub grid: GridConfig,
    pub costing: CostingConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            mode: "auto".to_string(),
            default: MatchOptions::default(),
            modes: FxHashMap::default(),
            grid: GridConfig::default(),
            costing: CostingConfig::default(),
        }
    }
}

impl MatcherConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Merges the options of a session in the mode `name`.
    ///
    /// Mode-specific options overwrite the defaults, and
    /// preferences overwrite both.
    pub fn merge(&self, name: &str, preferences: &MatchPreferences) -> MatchOptions {
        let options = match self.modes.get(name) {
            Some(mode) => self.default.overridden(mode),
            None => self.default,
        };

        options.overridden(preferences)
    }
}
