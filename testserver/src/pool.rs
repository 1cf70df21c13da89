//! Threads shared by all mock servers.
//!
//! Every test gets its own port, but the threads serving those ports are
//! reused.

use once_cell::sync::Lazy;
use threadfin::ThreadPool;

pub(crate) fn pool() -> &'static ThreadPool {
    static POOL: Lazy<ThreadPool> = Lazy::new(|| ThreadPool::builder().size(..100).build());

    &POOL
}
