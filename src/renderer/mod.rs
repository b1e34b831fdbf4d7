//! Rendering module
//!
//! Builds a per-frame display list from game state. Rasterising it (sprites, text,
//! triangle geometry) is left to the host.
//!
//! Host contract: `DrawCommand::Triangles` vertices are uploaded as-is
//! (`bytemuck::cast_slice`) into a vertex buffer laid out by [`Vertex::desc`].

pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod vertex;

pub use scene::{DrawCommand, DrawList, FontSize, TextAlign, draw_runner};
pub use sprites::{ATLAS_PATH, Region, Sprite};
pub use vertex::Vertex;
