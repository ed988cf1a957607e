mod fields;
mod filter;
mod hash;

pub use fields::list_fields;
pub use filter::filter_courses;
pub use hash::hash_filters;
