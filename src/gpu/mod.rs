mod context;
mod buffers;
mod render;

pub use context::{GpuContext, GpuError};
pub use buffers::FieldBuffers;
pub use render::RenderPipeline;
