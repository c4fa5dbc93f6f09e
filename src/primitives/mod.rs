pub mod cache;

pub use cache::{CacheKey, CacheMap, Calculable};
