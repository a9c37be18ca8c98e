//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here:
//! - World units and seconds, noted per field
//! - Documented ranges and meanings
//! - `validate()` on every group, run once at startup

mod field;
mod preset;
mod render;
mod surface;

// Re-export all types
pub use field::{DomainWarp, FractalParams, HeightFieldParams, Layer, WarpAxis, Waveform};
pub use preset::{Preset, SurfaceParams};
pub use render::{RecordingConfig, RenderConfig};
pub use surface::{AmplitudeMapParams, PlaneParams};
