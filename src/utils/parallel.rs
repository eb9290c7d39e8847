use crate::config::ParallelismPolicy;

const DEFAULT_CHUNK_SIZE: usize = 64;

/// Minimum number of items handed to a single rayon task.
pub fn preferred_chunk_size(total_items: usize) -> usize {
    if total_items == 0 {
        1
    } else {
        DEFAULT_CHUNK_SIZE.min(total_items.max(1))
    }
}

/// Maps `f` over `items`, fanning out to rayon when the policy allows it.
///
/// Output order always matches input order. On the sequential path the
/// first failing item's error is returned; the parallel path returns the
/// error of whichever failing item rayon observes first.
pub fn try_map<T, R, E, F>(items: &[T], policy: &ParallelismPolicy, f: F) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    if policy.should_parallelize(items.len()) {
        use rayon::prelude::*;
        let chunk = preferred_chunk_size(items.len());
        return items.par_iter().with_min_len(chunk).map(&f).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = policy;
    items.iter().map(f).collect()
}

/// Applies `f` to consecutive pairs of an even-length slice.
pub fn map_pairs<T, R, F>(items: &[T], policy: &ParallelismPolicy, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T, &T) -> R + Sync + Send,
{
    debug_assert!(items.len() % 2 == 0, "pairs require an even-length slice");
    #[cfg(feature = "parallel")]
    if policy.should_parallelize(items.len() / 2) {
        use rayon::prelude::*;
        let chunk = preferred_chunk_size(items.len() / 2);
        return items
            .par_chunks_exact(2)
            .with_min_len(chunk)
            .map(|pair| f(&pair[0], &pair[1]))
            .collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = policy;
    items
        .chunks_exact(2)
        .map(|pair| f(&pair[0], &pair[1]))
        .collect()
}
