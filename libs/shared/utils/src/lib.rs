pub mod extractor;
pub mod jwt;
pub mod specialty_map;
pub mod test_utils;
pub mod text;
