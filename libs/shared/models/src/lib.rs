pub mod auth;
pub mod error;
pub mod medical;

pub use medical::{Specialty, Weekday};
