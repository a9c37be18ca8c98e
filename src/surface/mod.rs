//! Animated cloth surface driven by a procedural height field.

mod amplitude;
mod mesh;
mod system;

// Re-export public types
pub use amplitude::AmplitudeMap;
pub use mesh::{ClothMesh, Vertex};
pub use system::SurfaceSystem;
