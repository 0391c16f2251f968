pub mod aaigrid;
pub mod geojson;

pub use aaigrid::{open_aaigrid, read_aaigrid, AsciiGrid};
pub use geojson::{save_feature_collection, FeatureCollection};
