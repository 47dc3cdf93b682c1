pub mod calc;
pub mod core;
pub mod export;
pub mod sheet;
pub mod students;
