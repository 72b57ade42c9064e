#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Maps every index in `0..len` through `f`, in parallel where threads exist.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn collect_indexed<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..len).into_par_iter().map(f).collect()
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn collect_indexed<T, F>(len: usize, f: F) -> Vec<T>
where
    F: Fn(usize) -> T,
{
    (0..len).map(f).collect()
}
