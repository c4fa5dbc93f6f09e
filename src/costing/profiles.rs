//! Access-based costing profiles for each supported mode.

use crate::costing::{CostModel, EdgeLabel, TravelMode};
use crate::network::{Access, DirectedEdge, EdgeId, NodeInfo};
use serde::{Deserialize, Serialize};

/// Tunable behaviour of a costing profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Permit reversing onto the opposite edge outside of dead ends.
    pub u_turns: bool,
    /// Treat every edge and node as accessible.
    pub ignore_access: bool,
}

/// A profile permitting the edges whose access flags include its mode.
///
/// ### Note
/// U-turns at the end of a dead end are always permitted, as there is
/// no other way to leave it.
#[derive(Clone, Copy, Debug)]
pub struct AccessCost {
    mode: TravelMode,
    access: Access,
    options: ProfileOptions,
}

impl AccessCost {
    pub fn new(mode: TravelMode, access: Access, options: ProfileOptions) -> Self {
        Self {
            mode,
            access,
            options,
        }
    }

    pub fn drive(options: ProfileOptions) -> Self {
        Self::new(TravelMode::Drive, Access::AUTO, options)
    }

    pub fn bicycle(options: ProfileOptions) -> Self {
        Self::new(TravelMode::Bicycle, Access::BICYCLE, options)
    }

    pub fn pedestrian(options: ProfileOptions) -> Self {
        Self::new(
            TravelMode::Pedestrian,
            Access::PEDESTRIAN,
            ProfileOptions {
                u_turns: true,
                ..options
            },
        )
    }

    /// Permits every mode, ignoring access restrictions and allowing U-turns.
    pub fn universal() -> Self {
        Self::new(
            TravelMode::Universal,
            Access::ALL,
            ProfileOptions {
                u_turns: true,
                ignore_access: true,
            },
        )
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    #[inline]
    fn accessible(&self, access: Access) -> bool {
        self.options.ignore_access || access.intersects(self.access)
    }
}

impl CostModel for AccessCost {
    fn travel_mode(&self) -> TravelMode {
        self.mode
    }

    fn allowed(&self, edge: &DirectedEdge, pred: &EdgeLabel, id: EdgeId) -> bool {
        if !self.accessible(edge.access) {
            return false;
        }

        self.options.u_turns || pred.dead_end || !pred.is_reversed_by(id, edge)
    }

    fn node_allowed(&self, node: &NodeInfo) -> bool {
        self.accessible(node.access)
    }

    fn filter(&self, edge: &DirectedEdge) -> bool {
        !self.accessible(edge.access)
    }
}
