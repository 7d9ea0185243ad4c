pub mod common;
pub mod formulas;
pub mod rating_types;
pub mod ratings;
pub mod submissions;

pub use common::status::Status;
