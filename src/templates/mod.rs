pub mod catalog;
pub mod custom;

pub use catalog::{all_templates, get_template, template_ids};
pub use custom::{create_custom_template, FeatureDensity, WeatherIntensity};
