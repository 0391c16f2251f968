pub mod candidate;
pub mod consts;
pub mod detection;
pub mod error;
pub mod geo;
pub mod grid;
pub mod io;
pub mod ranking;
pub mod scene;
pub mod stats;
