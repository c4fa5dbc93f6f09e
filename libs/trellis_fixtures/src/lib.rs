//! Well-known-text fixtures describing small road networks and the
//! traces driven upon them.
//!
//! Networks are given as a list of ways, each of which joins the ways
//! whose endpoints coincide with its own. Coordinates lie close to the
//! equator, where a thousandth of a degree spans roughly 111 metres.

/// A single straight road of roughly 1.1km, running east.
pub const STRAIGHT_ROAD: &[&str] = &["LINESTRING(0 0,0.01 0)"];

/// A three-by-three grid of intersections, spaced roughly 222m apart.
///
/// ```text
/// (0,0.004) o----o----o (0.004,0.004)
///           |    |    |
///           o----o----o
///           |    |    |
///     (0,0) o----o----o (0.004,0)
/// ```
pub const BLOCK_GRID: &[&str] = &[
    // Eastbound streets
    "LINESTRING(0 0,0.002 0)",
    "LINESTRING(0.002 0,0.004 0)",
    "LINESTRING(0 0.002,0.002 0.002)",
    "LINESTRING(0.002 0.002,0.004 0.002)",
    "LINESTRING(0 0.004,0.002 0.004)",
    "LINESTRING(0.002 0.004,0.004 0.004)",
    // Northbound avenues
    "LINESTRING(0 0,0 0.002)",
    "LINESTRING(0 0.002,0 0.004)",
    "LINESTRING(0.002 0,0.002 0.002)",
    "LINESTRING(0.002 0.002,0.002 0.004)",
    "LINESTRING(0.004 0,0.004 0.002)",
    "LINESTRING(0.004 0.002,0.004 0.004)",
];

/// A noisy trace along the southern street of [`BLOCK_GRID`],
/// turning north onto the eastern avenue.
pub const BLOCK_GRID_TRACE: &str = "LINESTRING(0.0002 0.00005,0.001 -0.00004,0.0018 0.00003,0.00396 0.0004,0.00405 0.0012,0.00404 0.002,0.00402 0.003)";

/// The expected snapped positions of [`BLOCK_GRID_TRACE`].
pub const BLOCK_GRID_MATCHED: &str = "LINESTRING(0.0002 0,0.001 0,0.0018 0,0.004 0.0004,0.004 0.0012,0.004 0.002,0.004 0.003)";

/// Two roads separated by a gap of roughly 2.8km.
pub const DISCONNECTED_ROADS: &[&str] = &["LINESTRING(0 0,0.005 0)", "LINESTRING(0.03 0,0.035 0)"];

/// A road crossing the boundary between two partitions of a quarter degree.
pub const PARTITION_CROSSING: &[&str] = &["LINESTRING(0.249 0.1,0.2495 0.1,0.2505 0.1,0.251 0.1)"];
