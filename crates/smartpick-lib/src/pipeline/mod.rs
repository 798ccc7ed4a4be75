//! Query → filter → score pipeline shared by every entry point.

pub mod filter;
pub mod recommend;

pub use recommend::{PhoneSummary, Recommendation, Scorer, recommend};
