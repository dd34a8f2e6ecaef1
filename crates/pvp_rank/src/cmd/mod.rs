pub mod rank;
pub mod types;
