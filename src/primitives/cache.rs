use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

pub trait CacheKey: Copy + Debug + Eq + Hash {}
impl<T> CacheKey for T where T: Copy + Debug + Eq + Hash {}

/// A generic read-through cache for a hashmap-backed data structure
#[derive(Debug)]
pub struct CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Debug,
{
    map: FxHashMap<K, Arc<V>>,
    pub(crate) metadata: Meta,
}

impl<K, V, Meta> CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Debug,
{
    pub fn new(metadata: Meta) -> Self {
        Self {
            map: FxHashMap::default(),
            metadata,
        }
    }

    /// Exposes a query call for the cache map, allowing the caller
    /// to use the cache in its intended read-through pattern design.
    ///
    /// ### Behaviour
    ///
    /// This function is only exposed for [`CacheMap`] implementations
    /// which implement [`Calculable`].
    ///
    /// The value is returned wrapped in a reference counter, and is only
    /// stored when the calculation succeeds. Keys which cannot be
    /// calculated are queried again on their next access.
    pub fn query<Ctx>(&mut self, ctx: &Ctx, key: K) -> Option<Arc<V>>
    where
        Ctx: ?Sized,
        Self: Calculable<Ctx, K, V>,
    {
        if let Some(value) = self.map.get(&key) {
            return Some(Arc::clone(value));
        }

        let calculated = Arc::new(self.calculate(ctx, key)?);
        self.map.insert(key, Arc::clone(&calculated));

        Some(calculated)
    }

    /// The number of cached entries.
    pub fn size(&self) -> usize {
        self.map.len()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V, Meta> Default for CacheMap<K, V, Meta>
where
    K: CacheKey,
    V: Debug,
    Meta: Default + Debug,
{
    fn default() -> Self {
        Self::new(Meta::default())
    }
}

/// A value, [`V`], derivable from its key, [`K`], given some context.
///
/// ### Examples
///
/// The [`crate::candidate::GridCache`] is calculable, deriving the
/// spatial grid of a partition from the road network it belongs to.
pub trait Calculable<Ctx: ?Sized, K: CacheKey, V> {
    /// The concrete implementation of the function which derives the
    /// value, [`V`], from the key, [`K`].
    ///
    /// Returns `None` if no value exists for the key.
    fn calculate(&mut self, ctx: &Ctx, key: K) -> Option<V>;
}
