use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::error::StartupError;
use crate::model::{Mat4, Vertex};
use crate::view::shader::{ShaderSources, FRAGMENT_ENTRY, VERTEX_ENTRY};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<Mat4> for ModelUniform {
    fn from(m: Mat4) -> Self {
        // row-major on the CPU, column-major in WGSL
        Self {
            model: m.to_cols_array_2d(),
        }
    }
}

/// Pipeline, geometry and the model uniform for the one triangle.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    /// False when the vertex shader never declared `u_model`; writes are skipped.
    model_uniform_present: bool,
    clear_color: wgpu::Color,
    viewport: PhysicalSize<u32>,
}

impl TriangleRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        shaders: &ShaderSources,
        vertices: &[Vertex],
        clear_color: wgpu::Color,
        viewport: PhysicalSize<u32>,
    ) -> Result<Self, StartupError> {
        let model_uniform_present = match shaders.model_uniform() {
            Some(binding) => {
                tracing::debug!(group = binding.group, binding = binding.binding, "u_model found");
                true
            }
            None => {
                tracing::warn!("u_model uniform not found in vertex shader (optimized out or misnamed); transform updates are disabled");
                false
            }
        };

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle_vertices"),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("model_uniform"),
            contents: bytemuck::bytes_of(&ModelUniform::from(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("model_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: model_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Validation errors here would otherwise go to the uncaptured handler and panic.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let vs = shaders.vertex.create_module(device);
        let fs = shaders.fragment.create_module(device);

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VERTEX_ENTRY),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FRAGMENT_ENTRY),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(StartupError::Pipeline(e.to_string()));
        }

        tracing::info!(vertices = vertices.len(), ?format, "triangle pipeline ready");

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            model_buffer,
            model_bind_group,
            model_uniform_present,
            clear_color,
            viewport,
        })
    }

    /// Framebuffer resized: the next pass covers the new size.
    pub fn set_viewport(&mut self, size: PhysicalSize<u32>) {
        self.viewport = size;
    }

    /// Upload `model`, clear, draw the triangle, then present.
    pub fn draw_frame(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface: &wgpu::Surface,
        model: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        if self.model_uniform_present {
            queue.write_buffer(&self.model_buffer, 0, bytemuck::bytes_of(&ModelUniform::from(model)));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("triangle_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_viewport(
                0.0,
                0.0,
                self.viewport.width as f32,
                self.viewport.height as f32,
                0.0,
                1.0,
            );
            rp.set_pipeline(&self.pipeline);
            rp.set_bind_group(0, &self.model_bind_group, &[]);
            rp.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rp.draw(0..self.vertex_count, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release GPU buffers. The pipeline and bind group go with `self`.
    pub fn destroy(self) {
        self.vertex_buffer.destroy();
        self.model_buffer.destroy();
        tracing::debug!("triangle renderer torn down");
    }
}
