/// Default dataset file, resolved relative to the working directory.
pub const DEFAULT_DATASET_PATH: &str = "smartphones.csv";

/// Default location of the trained regression pipeline.
pub const DEFAULT_MODEL_PATH: &str = "phone_recommendation_model.json";

/// Default location of the price-bucket classifier artifact.
pub const DEFAULT_CLASSIFIER_PATH: &str = "price_bucket_model.json";

/// Default number of recommendations returned per query.
pub const DEFAULT_TOP_N: usize = 5;

/// Price used when the query names no amount.
pub const DEFAULT_PRICE: u32 = 50_000;

/// Minimum RAM (GB) applied when the query does not mention RAM.
pub const DEFAULT_RAM_GB: u32 = 6;

/// Minimum battery capacity (mAh) applied when the query does not mention it.
pub const DEFAULT_BATTERY_MAH: u32 = 4_000;

/// Minimum primary rear camera resolution (MP) applied by default.
pub const DEFAULT_CAMERA_MP: u32 = 48;

/// Minimum number of rear cameras applied by default.
pub const DEFAULT_REAR_CAMERAS: u32 = 2;

/// Message returned when no phone survives the filters.
pub const NO_MATCH_MESSAGE: &str = "No phones match your query constraints.";

/// Fraction of rows held out for evaluation.
pub const TEST_FRACTION: f64 = 0.2;

/// Seed for the train/test shuffle and the random forest.
pub const RANDOM_SEED: u64 = 42;

/// Category substituted for empty categorical cells.
pub const MISSING_CATEGORY: &str = "0";

/// Number of trees in the price-bucket forest.
pub const FOREST_TREES: usize = 100;

/// Maximum depth of each tree in the price-bucket forest.
pub const FOREST_MAX_DEPTH: usize = 12;

/// Nodes with fewer samples than this become leaves.
pub const FOREST_MIN_SAMPLES_SPLIT: usize = 2;
