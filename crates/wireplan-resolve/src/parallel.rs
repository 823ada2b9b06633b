//! Optional data parallelism on the rayon pool

use rayon::prelude::*;

/// Map `items` in order, on the rayon pool when `parallel` is set
///
/// Output order always matches input order.
pub(crate) fn map_items<T, R, F>(items: &[T], parallel: bool, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if parallel {
        items.par_iter().map(f).collect()
    } else {
        items.iter().map(f).collect()
    }
}
