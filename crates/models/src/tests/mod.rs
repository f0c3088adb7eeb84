/// Pure serialization checks, no database required
pub mod model_tests;
