pub mod admin;
pub mod reports;
pub mod submissions;
