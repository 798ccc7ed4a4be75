//! Rating model: feature schema, preprocessing, regression, training, and
//! the serialized artifact the scorer loads at startup.

pub mod artifact;
pub mod features;
pub mod forest;
pub mod linear;
pub mod metrics;
pub mod preprocess;
pub mod train;

pub use artifact::TrainedModel;
pub use forest::{PriceBucket, PriceBucketModel};
