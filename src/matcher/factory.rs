use crate::Error;
use crate::candidate::CandidateGridQuery;
use crate::config::{ConfigError, MatchOptions, MatchPreferences, MatcherConfig};
use crate::costing::{AccessCost, ModeRegistry, TravelMode};
use crate::matching::{EdgeSegment, MapMatching, Measurement};
use crate::network::RoadNetwork;
use crate::offline::{self, MatchResult};
use geo::Point;
use log::{debug, info};
use std::sync::Arc;

/// Creates matchers over a single network, sharing a candidate grid
/// between them.
///
/// ### Example
/// ```rust
/// use geo::point;
/// use trellis::{MapMatcherFactory, NetworkBuilder};
/// use trellis::config::{MatchPreferences, MatcherConfig};
///
/// let network = NetworkBuilder::default()
///     .with_wkt(&["LINESTRING(0 0,0.01 0)"])
///     .build();
///
/// let mut factory = MapMatcherFactory::new(&network, MatcherConfig::default())
///     .expect("configuration is valid");
///
/// let mut matcher = factory
///     .create(&MatchPreferences::with_mode("pedestrian"))
///     .expect("mode is registered");
///
/// let trace = matcher.measure([point! { x: 0.001, y: 0.0001 }, point! { x: 0.004, y: -0.0001 }]);
/// let results = matcher.offline_match(&trace).expect("matching succeeds");
/// assert_eq!(results.len(), 2);
/// ```
#[derive(Debug)]
pub struct MapMatcherFactory<'a, N: RoadNetwork> {
    network: &'a N,
    config: MatcherConfig,
    registry: ModeRegistry,
    grid: CandidateGridQuery<'a, N>,
}

impl<'a, N: RoadNetwork> MapMatcherFactory<'a, N> {
    pub fn new(network: &'a N, config: MatcherConfig) -> Result<Self, ConfigError> {
        if config.grid.size == 0 {
            return Err(ConfigError::GridSize);
        }

        config.default.validate()?;

        let mut registry = ModeRegistry::default();
        registry.register("auto", Arc::new(AccessCost::drive(config.costing.auto)))?;
        registry.register("bicycle", Arc::new(AccessCost::bicycle(config.costing.bicycle)))?;
        registry.register(
            "pedestrian",
            Arc::new(AccessCost::pedestrian(config.costing.pedestrian)),
        )?;
        registry.register("multimodal", Arc::new(AccessCost::universal()))?;

        let cell_size = network.partition_size() / config.grid.size as f64;
        debug!("Candidate grid cells of {cell_size:.6} degrees");

        Ok(Self {
            network,
            registry,
            grid: CandidateGridQuery::new(network, cell_size, cell_size)?,
            config,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn network(&self) -> &'a N {
        self.network
    }

    /// Creates a matcher in the mode named by `preferences`,
    /// or the configured mode if it names none.
    pub fn create(
        &mut self,
        preferences: &MatchPreferences,
    ) -> Result<MapMatcher<'_, 'a, N>, ConfigError> {
        let name = preferences.mode.as_deref().unwrap_or(self.config.mode.as_str());

        let mode = self.registry.name_to_travel_mode(name)?;
        let costing = self.registry.costing(mode)?;
        let options = self.config.merge(name, preferences);

        debug!("Creating matcher in mode {name} ({mode}) with {options:?}");

        Ok(MapMatcher {
            mm: MapMatching::new(self.network, costing, &options)?,
            grid: &mut self.grid,
            travel_mode: mode,
            options,
        })
    }

    pub fn name_to_travel_mode(&self, name: &str) -> Result<TravelMode, ConfigError> {
        self.registry.name_to_travel_mode(name)
    }

    pub fn travel_mode_to_name(&self, mode: TravelMode) -> Result<&str, ConfigError> {
        self.registry.travel_mode_to_name(mode)
    }

    /// The number of partitions held by the candidate grid.
    pub fn grid_cache_size(&self) -> usize {
        self.grid.size()
    }

    /// Releases caches which have grown beyond their configured bounds.
    pub fn clear_full_cache(&mut self) {
        if self.network.over_committed() {
            info!("Network is over-committed, clearing its cache");
            self.network.clear_cache();
        }

        if self.grid.size() > self.config.grid.cache_size {
            info!(
                "Candidate grid holds {} partitions (limit {}), clearing",
                self.grid.size(),
                self.config.grid.cache_size
            );
            self.grid.clear();
        }
    }

    pub fn clear_cache(&mut self) {
        self.network.clear_cache();
        self.grid.clear();
    }
}

/// A matcher in a single travel mode, created by a [`MapMatcherFactory`].
#[derive(Debug)]
pub struct MapMatcher<'f, 'a, N: RoadNetwork> {
    mm: MapMatching<'a, N>,
    grid: &'f mut CandidateGridQuery<'a, N>,
    travel_mode: TravelMode,
    options: MatchOptions,
}

impl<'a, N: RoadNetwork> MapMatcher<'_, 'a, N> {
    #[inline]
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    #[inline]
    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    /// The session of the most recent match.
    pub fn matching(&self) -> &MapMatching<'a, N> {
        &self.mm
    }

    /// Measurements at the given positions, with the configured
    /// accuracy and search radius.
    pub fn measure(&self, points: impl IntoIterator<Item = Point>) -> Vec<Measurement> {
        points
            .into_iter()
            .map(|point| {
                Measurement::new(point, self.options.gps_accuracy, self.options.search_radius)
            })
            .collect()
    }

    /// Matches every measurement of the trace, see [`offline::offline_match`].
    pub fn offline_match(&mut self, measurements: &[Measurement]) -> Result<Vec<MatchResult>, Error> {
        offline::offline_match(
            &mut self.mm,
            &mut *self.grid,
            measurements,
            self.options.sq_search_radius(),
            self.options.interpolation_distance,
        )
    }

    /// The route driven through the results of the most recent match.
    pub fn construct_route(&self, results: &[MatchResult]) -> Result<Vec<EdgeSegment>, Error> {
        offline::construct_route(&self.mm, results)
    }
}
