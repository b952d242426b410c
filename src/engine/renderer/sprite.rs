// Sprite quad pipeline

use wgpu::util::DeviceExt;

use super::camera::{CameraUniform, ScreenCamera};
use super::vertex::Vertex;
use crate::core::math::Rect;

/// One drawable unit produced by the simulation each tick
///
/// `src` is a region on the sprite sheet in sheet pixels, `dest` a region on
/// screen in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteFrame {
    pub src: Rect,
    pub dest: Rect,
    pub flip_horizontal: bool,
}

/// Normalized texture coordinates of a quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRegion {
    pub u_min: f32,
    pub v_min: f32,
    pub u_max: f32,
    pub v_max: f32,
}

impl UvRegion {
    /// The whole texture
    pub const FULL: UvRegion = UvRegion {
        u_min: 0.0,
        v_min: 0.0,
        u_max: 1.0,
        v_max: 1.0,
    };

    /// Normalize a pixel region of a `texture_width` x `texture_height` texture
    pub fn from_pixel_rect(src: Rect, texture_width: u32, texture_height: u32) -> Self {
        let tw = texture_width as f32;
        let th = texture_height as f32;
        Self {
            u_min: src.x / tw,
            v_min: src.y / th,
            u_max: src.right() / tw,
            v_max: src.bottom() / th,
        }
    }

    /// Mirror the region horizontally (swap left and right edges)
    pub fn flipped_horizontal(self) -> Self {
        Self {
            u_min: self.u_max,
            u_max: self.u_min,
            ..self
        }
    }
}

/// Build the four corner vertices of a screen-space quad
///
/// Order: top-left, bottom-left, bottom-right, top-right, matching
/// `QUAD_INDICES`.
pub fn quad_vertices(dest: Rect, uv: UvRegion) -> [Vertex; 4] {
    [
        Vertex::textured(dest.x, dest.y, uv.u_min, uv.v_min),
        Vertex::textured(dest.x, dest.bottom(), uv.u_min, uv.v_max),
        Vertex::textured(dest.right(), dest.bottom(), uv.u_max, uv.v_max),
        Vertex::textured(dest.right(), dest.y, uv.u_max, uv.v_min),
    ]
}

/// Two triangles over the four quad corners
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Most quads drawn in one frame (character + ground, with headroom)
const MAX_QUADS: usize = 16;

/// Pipeline and buffers for drawing textured screen-space quads
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl SpriteRenderer {
    /// Create the sprite pipeline for the given surface format
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
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

        let texture_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
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
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Quads are flat 2D; no winding games after the y-flip
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

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Sprite Vertex Buffer"),
            size: (MAX_QUADS * 4 * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sprite Index Buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let camera_uniform = CameraUniform {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
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

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            camera_buffer,
            camera_bind_group,
            texture_bind_group_layout,
        }
    }

    /// Layout textures must match to bind into this pipeline
    pub fn texture_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }

    /// Push the camera projection to the GPU
    pub fn update_camera(&self, queue: &wgpu::Queue, camera: &ScreenCamera) {
        let uniform = CameraUniform::new(camera);
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Upload this frame's quads into the vertex buffer
    ///
    /// Quads beyond `MAX_QUADS` are ignored; the frame only ever carries a
    /// handful.
    pub fn upload_quads(&self, queue: &wgpu::Queue, quads: &[[Vertex; 4]]) {
        let count = quads.len().min(MAX_QUADS);
        let vertices: Vec<Vertex> = quads[..count].iter().flatten().copied().collect();
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
    }

    /// Bind the pipeline and shared buffers for a render pass
    pub fn bind<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
    }

    /// Draw one previously uploaded quad with the given texture
    pub fn draw_quad<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        quad_index: usize,
        texture_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_bind_group(1, texture_bind_group, &[]);
        render_pass.draw_indexed(0..6, (quad_index * 4) as i32, 0..1);
    }
}
