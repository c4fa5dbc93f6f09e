use crate::candidate::query::corner_partitions;
use crate::candidate::grid::{MAX_GRID_CELLS, cell_count};
use crate::candidate::{Candidate, CandidateQuery, EdgeFilter, GridRangeQuery, within_squared_distance};
use crate::config::ConfigError;
use crate::network::{EdgeId, PartitionId, RoadNetwork};
use crate::primitives::{CacheMap, Calculable};
use geo::{Point, Rect};
use log::debug;
use rustc_hash::FxHashSet;

/// Dimensions of the cells of every cached grid, in degrees.
#[derive(Clone, Copy, Debug)]
pub struct GridMetadata {
    pub cell_width: f64,
    pub cell_height: f64,
}

/// The cache map of spatial grids, keyed by the partition they index.
pub type GridCache = CacheMap<PartitionId, GridRangeQuery<EdgeId>, GridMetadata>;

impl<N: RoadNetwork> Calculable<N, PartitionId, GridRangeQuery<EdgeId>> for GridCache {
    fn calculate(&mut self, network: &N, partition: PartitionId) -> Option<GridRangeQuery<EdgeId>> {
        let bounds = network.partition_bounds(partition)?;
        let GridMetadata { cell_width, cell_height } = self.metadata;

        let mut grid = GridRangeQuery::new(bounds, cell_width, cell_height)?;
        let mut indexed_shapes = FxHashSet::default();

        // Both directions share a shape, only the first is indexed
        for id in network.partition_edges(partition) {
            let Some(edge) = network.edge(id) else {
                continue;
            };

            if !indexed_shapes.insert(edge.shape) {
                continue;
            }

            if let Some(shape) = network.shape(id) {
                shape
                    .lines()
                    .for_each(|segment| grid.add_line_segment(id, segment));
            }
        }

        debug!(
            "Indexed {} shapes of partition {}/{}",
            indexed_shapes.len(),
            partition.level,
            partition.tile
        );

        Some(grid)
    }
}

/// Finds candidates through a lazily built spatial grid per partition.
///
/// Grids persist between queries, until [`CandidateGridQuery::clear`].
#[derive(Debug)]
pub struct CandidateGridQuery<'a, N: RoadNetwork> {
    network: &'a N,
    cache: GridCache,
}

impl<'a, N: RoadNetwork> CandidateGridQuery<'a, N> {
    /// A query over grids of the given cell dimensions, in degrees.
    ///
    /// Fails unless both dimensions are finite and positive, and the grid
    /// of a partition holds at most [`MAX_GRID_CELLS`] cells.
    pub fn new(network: &'a N, cell_width: f64, cell_height: f64) -> Result<Self, ConfigError> {
        for size in [cell_width, cell_height] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ConfigError::CellSize(size));
            }
        }

        let extent = network.partition_size();
        let cells = cell_count(extent, cell_width)
            .zip(cell_count(extent, cell_height))
            .and_then(|(columns, rows)| columns.checked_mul(rows))
            .filter(|cells| *cells <= MAX_GRID_CELLS);

        if cells.is_none() {
            return Err(ConfigError::GridCells(MAX_GRID_CELLS));
        }

        Ok(Self {
            network,
            cache: GridCache::new(GridMetadata {
                cell_width,
                cell_height,
            }),
        })
    }

    pub fn network(&self) -> &'a N {
        self.network
    }

    /// The edges indexed within `range`, across the given partitions,
    /// in ascending order.
    pub fn range_query(&mut self, range: &Rect, partitions: &[PartitionId]) -> Vec<EdgeId> {
        let mut edges = FxHashSet::default();

        for partition in partitions {
            if let Some(grid) = self.cache.query(self.network, *partition) {
                edges.extend(grid.query(range));
            }
        }

        let mut edges = edges.into_iter().collect::<Vec<_>>();
        edges.sort_unstable();
        edges
    }

    /// The number of cached grids.
    pub fn size(&self) -> usize {
        self.cache.size()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<N: RoadNetwork> CandidateQuery for CandidateGridQuery<'_, N> {
    fn query(
        &mut self,
        location: &Point,
        sq_search_radius: f64,
        filter: Option<EdgeFilter>,
    ) -> Vec<Candidate> {
        let (range, partitions) = corner_partitions(self.network, location, sq_search_radius);
        let edges = self.range_query(&range, &partitions);

        within_squared_distance(self.network, location, sq_search_radius, edges, filter)
    }
}
