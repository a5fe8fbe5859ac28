#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

pub mod attribute;
pub mod config;
pub mod error;
pub mod gap;
pub mod network;
pub mod projection;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{GapConfig, MergeConfig, NetworkConfig};
pub use error::GapError;
pub use gap::{GapCloser, ProblemLog, Rejection, Statistics};
pub use network::{Network, NetworkBuilder};

#[doc(inline)]
pub use radnetz_linear as linear;
