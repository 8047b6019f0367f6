//! Compute backends for shell expansion.
//!
//! A backend runs a batch of independent [`Tile`]s through a
//! [`ShellKernel`]. Tiles cover disjoint output slots, so a backend is free
//! to run them in any order on any number of threads.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mesh_fur::{ComputeBackend, RayonBackend, SequentialBackend};
//!
//! let backends: Vec<Arc<dyn ComputeBackend>> = vec![
//!     Arc::new(SequentialBackend),
//!     Arc::new(RayonBackend::global()),
//! ];
//! for backend in &backends {
//!     println!("{} runs {} worker(s)", backend.name(), backend.parallelism());
//! }
//! ```

use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{FurError, FurResult};
use crate::expand::{ShellKernel, Tile};

/// A parallel compute capability that can run expansion tiles.
pub trait ComputeBackend: Send + Sync + std::fmt::Debug {
    /// Short backend name for logs and statistics.
    fn name(&self) -> &str;

    /// Number of workers the backend runs tiles on.
    fn parallelism(&self) -> usize;

    /// Run every tile through `kernel` and return once all are done.
    fn dispatch(&self, tiles: Vec<Tile<'_>>, kernel: &ShellKernel<'_>);
}

/// Runs tiles one after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBackend;

impl ComputeBackend for SequentialBackend {
    fn name(&self) -> &str {
        "sequential"
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn dispatch(&self, tiles: Vec<Tile<'_>>, kernel: &ShellKernel<'_>) {
        for tile in tiles {
            kernel.run(tile);
        }
    }
}

/// Runs tiles on a rayon thread pool.
///
/// Uses the global rayon pool unless built with
/// [`RayonBackend::with_threads`].
#[derive(Debug, Default)]
pub struct RayonBackend {
    pool: Option<ThreadPool>,
}

impl RayonBackend {
    /// Backend on the global rayon pool.
    #[must_use]
    pub const fn global() -> Self {
        Self { pool: None }
    }

    /// Backend on a dedicated pool with `threads` workers.
    ///
    /// # Errors
    ///
    /// Returns [`FurError::Backend`] if the pool cannot be built.
    pub fn with_threads(threads: usize) -> FurResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("mesh-fur-{i}"))
            .build()
            .map_err(|e| FurError::backend(e.to_string()))?;

        debug!(threads = pool.current_num_threads(), "Built rayon pool");
        Ok(Self { pool: Some(pool) })
    }
}

impl ComputeBackend for RayonBackend {
    fn name(&self) -> &str {
        "rayon"
    }

    fn parallelism(&self) -> usize {
        self.pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, ThreadPool::current_num_threads)
    }

    fn dispatch(&self, tiles: Vec<Tile<'_>>, kernel: &ShellKernel<'_>) {
        let run = || tiles.into_par_iter().for_each(|tile| kernel.run(tile));
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Shared backend on the global rayon pool.
#[must_use]
pub fn default_backend() -> Arc<dyn ComputeBackend> {
    Arc::new(RayonBackend::global())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_backend() {
        let backend = SequentialBackend;
        assert_eq!(backend.name(), "sequential");
        assert_eq!(backend.parallelism(), 1);
    }

    #[test]
    fn test_rayon_with_threads() {
        let backend = RayonBackend::with_threads(3).unwrap();
        assert_eq!(backend.name(), "rayon");
        assert_eq!(backend.parallelism(), 3);
    }

    #[test]
    fn test_rayon_global() {
        let backend = RayonBackend::global();
        assert!(backend.parallelism() >= 1);
    }

    #[test]
    fn test_default_backend_is_rayon() {
        assert_eq!(default_backend().name(), "rayon");
    }

    #[test]
    fn test_backend_is_object_safe() {
        fn assert_dyn(_: &dyn ComputeBackend) {}
        assert_dyn(&SequentialBackend);
        assert_dyn(&RayonBackend::global());
    }
}
