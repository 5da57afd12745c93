#![doc = include_str!("../README.md")]

mod alphabet;
mod analysis;
mod codec;
mod config;
mod error;
mod generator;
mod partition;
mod pipeline;
mod record;
mod sink;

pub use crate::alphabet::*;
pub use crate::analysis::*;
pub use crate::codec::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::partition::*;
pub use crate::pipeline::*;
pub use crate::record::*;
pub use crate::sink::*;
