pub mod availability;
pub mod doctor;
pub mod geo;
pub mod matching;
pub mod scoring;

pub use availability::AvailabilityChecker;
pub use doctor::{DoctorStore, SupabaseDoctorStore};
pub use geo::GeoPoint;
pub use matching::DoctorMatchingService;
pub use scoring::{MatchScorer, ScoreBreakdown};
