pub mod constants;
pub mod detector;
