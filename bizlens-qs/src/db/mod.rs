//! Database queries for the drill-down lookup pipeline
//!
//! All queries here are read-only. Each drill-down stage filters on the
//! previous stage's selection; a stage with no matches returns an empty
//! vector, never an error.

pub mod categories;
pub mod drilldown;
pub mod rankings;
pub mod stats;

pub use categories::{count_category_tokens, split_category_tokens};
pub use drilldown::{
    get_businesses_by_category, get_categories, get_cities, get_states, get_zipcodes, BusinessRow,
};
pub use rankings::{
    get_popular_businesses, get_successful_businesses, PopularBusiness, SuccessfulBusiness,
};
pub use stats::{get_top_categories, get_zipcode_stats, CategoryCount, ZipcodeStats};
