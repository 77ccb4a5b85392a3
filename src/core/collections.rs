//! Collection aliases used across the triangulation and hull code.
//!
//! Hash-based collections use `rustc_hash` for fast, non-cryptographic hashing,
//! and per-simplex buffers use `smallvec` so that vertex and neighbor lists of
//! low-dimensional simplices stay on the stack.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;

// =============================================================================
// CORE OPTIMIZED TYPES
// =============================================================================

/// Optimized `HashMap` type for internal lookups.
///
/// Uses `rustc_hash::FxHasher`. Not DoS-resistant: only use with keys the
/// crate derives itself (vertex indices, ridge keys).
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u64, usize> = FastHashMap::default();
/// map.insert(123, 456);
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Optimized `HashSet` type for internal membership tests.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::collections::FastHashSet;
///
/// let mut set: FastHashSet<usize> = FastHashSet::default();
/// set.insert(7);
/// assert!(set.contains(&7));
/// ```
pub type FastHashSet<T> = FxHashSet<T>;

/// Build hasher backing [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

/// Small-optimized Vec that stays on the stack for up to `N` elements.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
/// buffer.push(42);
/// assert_eq!(buffer.len(), 1);
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

// =============================================================================
// SEMANTIC SIZE CONSTANTS AND TYPE ALIASES
// =============================================================================

/// Inline capacity for per-simplex buffers.
///
/// A simplex on the hull of a lifted D-dimensional point set has `D + 1`
/// vertices, so 8 covers lifted inputs up to 7D without spilling.
pub const MAX_PRACTICAL_DIMENSION_SIZE: usize = 8;

/// Vertex indices of one simplex.
pub type SimplexVertices = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Neighbor slots of one simplex; `None` marks a missing neighbor.
pub type SimplexNeighbors = SmallBuffer<Option<usize>, MAX_PRACTICAL_DIMENSION_SIZE>;

/// Sorted vertex indices identifying a ridge (a facet of a simplex).
pub type RidgeKey = SmallBuffer<usize, MAX_PRACTICAL_DIMENSION_SIZE>;

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Creates a `FastHashMap` with pre-allocated capacity.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::collections::fast_hash_map_with_capacity;
///
/// let map = fast_hash_map_with_capacity::<u64, usize>(100);
/// assert!(map.capacity() >= 100);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Creates a `FastHashSet` with pre-allocated capacity.
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Builds the key of the ridge obtained by dropping `skip` from `vertices`.
///
/// The key is sorted, so two simplices sharing a ridge produce equal keys
/// regardless of their vertex order.
///
/// # Examples
///
/// ```rust
/// use lifted_delaunay::core::collections::ridge_key;
///
/// assert_eq!(ridge_key(&[4, 1, 9], 0).as_slice(), &[1, 9]);
/// assert_eq!(ridge_key(&[9, 4, 1], 1).as_slice(), &[1, 9]);
/// ```
#[must_use]
pub fn ridge_key(vertices: &[usize], skip: usize) -> RidgeKey {
    let mut key: RidgeKey = vertices
        .iter()
        .enumerate()
        .filter(|&(slot, _)| slot != skip)
        .map(|(_, &v)| v)
        .collect();
    key.sort_unstable();
    key
}
