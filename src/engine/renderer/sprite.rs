// Textured-quad rendering

use super::{CameraUniform, TextureHandle, TextureManager, Vertex};
use crate::core::math::Rect;
use crate::engine::animation::Frame;
use anyhow::Result;
use glam::{Mat4, Vec2};
use wgpu::util::DeviceExt;

/// One frame drawn at a screen-space rectangle
#[derive(Debug, Clone, Copy)]
pub struct DrawCommand {
    /// The frame to draw
    pub frame: Frame,
    /// Where to draw it, in pixels
    pub rect: Rect,
}

impl DrawCommand {
    /// Create a new draw command
    pub fn new(frame: Frame, rect: Rect) -> Self {
        Self { frame, rect }
    }
}

/// Renders a list of draw commands as textured quads, in list order.
///
/// Each tick the quad geometry is rebuilt from the commands; there is no
/// batching or z-ordering, draw order is the command order.
pub struct QuadRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    quad_textures: Vec<TextureHandle>,
}

impl QuadRenderer {
    /// Create the quad pipeline for the given surface configuration
    pub fn new(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
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

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Screen-space y-down flips winding, so don't cull
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
        });

        let camera_uniform = CameraUniform {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        };

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            render_pipeline,
            camera_buffer,
            camera_bind_group,
            texture_layout,
            vertex_buffer: None,
            index_buffer: None,
            quad_textures: Vec::new(),
        })
    }

    /// Rebuild quad geometry for this tick's draw commands
    pub fn prepare(&mut self, device: &wgpu::Device, commands: &[DrawCommand]) {
        self.quad_textures.clear();

        if commands.is_empty() {
            self.vertex_buffer = None;
            self.index_buffer = None;
            return;
        }

        let mut vertices = Vec::with_capacity(commands.len() * 4);
        let mut indices: Vec<u32> = Vec::with_capacity(commands.len() * 6);

        for (i, command) in commands.iter().enumerate() {
            let rect = command.rect;
            let left = rect.x as f32;
            let top = rect.y as f32;
            let right = left + rect.width as f32;
            let bottom = top + rect.height as f32;

            vertices.push(Vertex::new(Vec2::new(left, top), Vec2::new(0.0, 0.0)));
            vertices.push(Vertex::new(Vec2::new(right, top), Vec2::new(1.0, 0.0)));
            vertices.push(Vertex::new(Vec2::new(right, bottom), Vec2::new(1.0, 1.0)));
            vertices.push(Vertex::new(Vec2::new(left, bottom), Vec2::new(0.0, 1.0)));

            let base = (i * 4) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

            self.quad_textures.push(command.frame.texture);
        }

        self.vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
    }

    /// Draw the prepared quads in order
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        textures: &'a TextureManager,
    ) -> Result<()> {
        let (Some(vertex_buffer), Some(index_buffer)) =
            (self.vertex_buffer.as_ref(), self.index_buffer.as_ref())
        else {
            return Ok(());
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        for (i, handle) in self.quad_textures.iter().enumerate() {
            let texture = textures
                .get(*handle)
                .ok_or_else(|| anyhow::anyhow!("draw command references unknown texture"))?;
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            let start = (i * 6) as u32;
            render_pass.draw_indexed(start..start + 6, 0, 0..1);
        }

        Ok(())
    }

    /// Layout textures must be bound with
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// The camera uniform buffer
    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    /// Number of quads prepared for this tick
    pub fn quad_count(&self) -> usize {
        self.quad_textures.len()
    }
}
