pub mod analysis;
pub mod extractor;
pub mod report;
pub mod store;

pub use analysis::SymptomAnalysisService;
pub use extractor::{extract, SymptomExtraction};
pub use store::{AnalysisStore, PatientStore, SupabaseAnalysisStore, SupabasePatientStore};
