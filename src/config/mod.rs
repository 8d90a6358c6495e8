//! Configuration snapshot consumed by schedule recomputation.

pub mod sched;

pub use sched::{SchedConf, CONFIG_PATH_ENV};
