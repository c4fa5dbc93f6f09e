//! Interfaces to the road network being matched against, and an
//! in-memory implementation of them.

pub mod definition;
pub mod ids;
pub mod memory;
pub mod primitives;


#[doc(inline)]
pub use definition::RoadNetwork;
#[doc(inline)]
pub use ids::{EdgeId, GraphElement, GraphId, NodeId, PartitionId};
#[doc(inline)]
pub use memory::{DEFAULT_PARTITION_SIZE, InMemoryNetwork, NetworkBuilder};
#[doc(inline)]
pub use primitives::{Access, DirectedEdge, MAX_LOCAL_HEADINGS, NodeInfo};
