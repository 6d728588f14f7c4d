pub mod feature;
pub mod template;

pub use feature::{FeatureType, MapFeature};
pub use template::{Difficulty, MapTemplate};
