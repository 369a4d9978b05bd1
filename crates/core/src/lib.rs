#![forbid(unsafe_code)]

pub mod analysis;
pub mod model;
pub mod time;

pub use time::Clock;
