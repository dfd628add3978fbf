pub mod candidate;
pub mod filters;
pub mod lenient;
