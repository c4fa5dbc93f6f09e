use std::fmt::{Display, Formatter};

/// A spatial partition (tile) of the road network at a hierarchy level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionId {
    pub level: u8,
    pub tile: u32,
}

impl PartitionId {
    pub const fn new(level: u8, tile: u32) -> Self {
        Self { level, tile }
    }

    /// The identifier of the object at `index` within this partition.
    #[inline]
    pub const fn id(&self, index: u32) -> GraphId {
        GraphId::new(self.level, self.tile, index)
    }
}

/// Addresses an object within a partition of the network.
///
/// ```text
///  level   tile     index
///  [u8 ] / [u32 ] / [u32 ]
/// ```
///
/// The all-ones value is reserved as [`GraphId::INVALID`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId {
    level: u8,
    tile: u32,
    index: u32,
}

impl GraphId {
    pub const INVALID: GraphId = GraphId::new(u8::MAX, u32::MAX, u32::MAX);

    pub const fn new(level: u8, tile: u32, index: u32) -> Self {
        Self { level, tile, index }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    #[inline]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[inline]
    pub const fn tile(&self) -> u32 {
        self.tile
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn partition(&self) -> PartitionId {
        PartitionId::new(self.level, self.tile)
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl Display for GraphId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "{}/{}/{}", self.level, self.tile, self.index)
        } else {
            write!(f, "invalid")
        }
    }
}

macro_rules! graph_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(pub GraphId);

        impl $name {
            pub const INVALID: $name = $name(GraphId::INVALID);

            #[inline]
            pub fn is_valid(&self) -> bool {
                self.0.is_valid()
            }

            #[inline]
            pub const fn level(&self) -> u8 {
                self.0.level()
            }

            #[inline]
            pub const fn partition(&self) -> PartitionId {
                self.0.partition()
            }

            #[inline]
            pub const fn index(&self) -> u32 {
                self.0.index()
            }
        }

        impl From<GraphId> for $name {
            fn from(value: GraphId) -> Self {
                $name(value)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

graph_object!(
    /// Identifies a node (intersection) of the network.
    NodeId
);

graph_object!(
    /// Identifies one direction of a physical edge of the network.
    EdgeId
);

/// A resolved element of the network, either a node or an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphElement {
    Node(NodeId),
    Edge(EdgeId),
}

impl GraphElement {
    pub fn is_valid(&self) -> bool {
        match self {
            GraphElement::Node(node) => node.is_valid(),
            GraphElement::Edge(edge) => edge.is_valid(),
        }
    }
}

impl From<NodeId> for GraphElement {
    fn from(value: NodeId) -> Self {
        GraphElement::Node(value)
    }
}

impl From<EdgeId> for GraphElement {
    fn from(value: EdgeId) -> Self {
        GraphElement::Edge(value)
    }
}
