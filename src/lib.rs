#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod bootstrap;
pub mod classify;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod store;
#[cfg(feature = "http_server")]
pub mod server;

#[doc(hidden)]
pub mod error;
#[doc(hidden)]
pub mod util;

#[doc(inline)]
pub use classify::{Classify, DEFAULT_CORRIDOR_WIDTH};
#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use engine::{CorridorEngine, CorridorQuery};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use geometry::{Corridor, Segment};
#[doc(inline)]
pub use store::{PointStore, SensorPoint};
