//! Bar providers, universes and the data error model.

pub mod circuit_breaker;
pub mod memory;
pub mod provider;
pub mod synthetic;
pub mod universe;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use memory::InMemoryProvider;
pub use provider::{BarProvider, DataError, Interval, OpenClose, ParseRangeError, Period};
pub use synthetic::SyntheticProvider;
pub use universe::{Universe, UniverseError};
pub use yahoo::YahooProvider;
