use wgpu::{Buffer, BufferUsages, Device, Queue};
use crate::config::DISPLAY_AMPLITUDE;
use crate::simulation::WaveField;

/// Render parameters passed to the fragment shader (16 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    pub grid_width: u32,
    pub grid_height: u32,
    /// Height mapped to full colour saturation
    pub display_amplitude: f32,
    /// 1 dims the picture while the simulation is paused
    pub paused: u32,
}

/// GPU-side copy of a wave field: heights re-uploaded every frame, the
/// mask only when the field is rebuilt.
pub struct FieldBuffers {
    /// Heights as f32, row-major
    pub height_buffer: Buffer,
    /// Mask as u32 (0 = wall), row-major
    pub mask_buffer: Buffer,
    /// Uniform buffer for render parameters
    pub render_params_buffer: Buffer,
    /// Reused conversion buffer so uploads don't allocate per frame
    staging: Vec<f32>,
    pub width: u32,
    pub height: u32,
}

impl FieldBuffers {
    /// Create buffers sized for `field` and upload its mask
    pub fn new(device: &Device, queue: &Queue, field: &WaveField) -> Self {
        let width = field.width() as u32;
        let height = field.height() as u32;
        let cell_count = field.width() * field.height();

        let height_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("height-buffer"),
            size: (cell_count * std::mem::size_of::<f32>()) as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mask_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mask-buffer"),
            size: (cell_count * std::mem::size_of::<u32>()) as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mask = encode_mask(field.mask());
        queue.write_buffer(&mask_buffer, 0, bytemuck::cast_slice(&mask));

        let mut buffers = Self {
            height_buffer,
            mask_buffer,
            render_params_buffer,
            staging: vec![0.0; cell_count],
            width,
            height,
        };
        buffers.upload_heights(queue, field);
        buffers.update_render_params(queue, false);
        buffers
    }

    /// Copy the current heights to the GPU
    pub fn upload_heights(&mut self, queue: &Queue, field: &WaveField) {
        debug_assert_eq!(field.heights().len(), self.staging.len());
        for (dst, &h) in self.staging.iter_mut().zip(field.heights()) {
            *dst = h as f32;
        }
        queue.write_buffer(&self.height_buffer, 0, bytemuck::cast_slice(&self.staging));
    }

    /// Update render parameters
    pub fn update_render_params(&self, queue: &Queue, paused: bool) {
        let params = RenderParams {
            grid_width: self.width,
            grid_height: self.height,
            display_amplitude: DISPLAY_AMPLITUDE,
            paused: paused as u32,
        };
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(&params));
    }
}

/// Mask as shader-friendly words (WGSL has no bool storage arrays)
pub fn encode_mask(mask: &[bool]) -> Vec<u32> {
    mask.iter().map(|&inside| inside as u32).collect()
}
