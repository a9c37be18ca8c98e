//! Clothwave library - procedurally animated cloth backdrop

pub mod cli;
pub mod clock;
pub mod driver;
pub mod error;
pub mod field;
pub mod noise;
pub mod params;
pub mod rendering;
pub mod surface;
