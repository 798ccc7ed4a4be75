pub mod parser;

pub use parser::{PriceDirection, QueryConstraints, parse_query};
