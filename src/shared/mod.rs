pub mod constants;
pub mod service_year;
pub mod test_helpers;
pub mod types;
pub mod validation;
