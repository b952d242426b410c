// Rendering system using wgpu

mod camera;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{CameraUniform, ScreenCamera};
pub use sprite::{quad_vertices, SpriteFrame, SpriteRenderer, UvRegion};
pub use texture::Texture;
pub use vertex::Vertex;

use anyhow::Result;
use log::info;
use std::sync::Arc;
use winit::window::Window;

use crate::core::math::Rect;

/// Main renderer: owns the surface, device, and every GPU resource
///
/// The simulation owns none of this; it hands over one `SpriteFrame` per
/// tick and the renderer turns it into a character quad plus the ground
/// line.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    camera: ScreenCamera,
    sheet: Texture,
    sheet_bind_group: wgpu::BindGroup,
    ground_bind_group: wgpu::BindGroup,
}

impl Renderer {
    /// Create a renderer for the window and load the sprite sheet
    pub async fn new(window: Arc<Window>, sheet_path: &str) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let sprite_renderer = SpriteRenderer::new(&device, surface_format);

        // Sprite sheet; failure here aborts startup
        let sheet = Texture::from_file(&device, &queue, sheet_path)?;
        info!(
            "Loaded sprite sheet {} ({}x{})",
            sheet_path, sheet.width, sheet.height
        );
        let sheet_bind_group = sheet.bind_group(
            &device,
            sprite_renderer.texture_bind_group_layout(),
            "Sheet Bind Group",
        );

        // White 1x1 fill for the ground line
        let ground = Texture::from_color(&device, &queue, [255, 255, 255, 255], Some("Ground"));
        let ground_bind_group = ground.bind_group(
            &device,
            sprite_renderer.texture_bind_group_layout(),
            "Ground Bind Group",
        );

        let camera = ScreenCamera::new(size.width as f32, size.height as f32);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            camera,
            sheet,
            sheet_bind_group,
            ground_bind_group,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.camera
                .resize(new_size.width as f32, new_size.height as f32);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Sprite sheet dimensions in pixels
    pub fn sheet_size(&self) -> (u32, u32) {
        (self.sheet.width, self.sheet.height)
    }

    /// Draw one frame: clear, character sprite, ground line, present
    pub fn render(&mut self, frame: &SpriteFrame, ground_y: f32) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut sprite_uv = UvRegion::from_pixel_rect(frame.src, self.sheet.width, self.sheet.height);
        if frame.flip_horizontal {
            sprite_uv = sprite_uv.flipped_horizontal();
        }

        let ground_rect = Rect::new(0.0, ground_y, self.size.width as f32, 1.0);
        let quads = [
            quad_vertices(frame.dest, sprite_uv),
            quad_vertices(ground_rect, UvRegion::FULL),
        ];

        self.sprite_renderer.update_camera(&self.queue, &self.camera);
        self.sprite_renderer.upload_quads(&self.queue, &quads);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sprite_renderer.bind(&mut render_pass);
            self.sprite_renderer
                .draw_quad(&mut render_pass, 0, &self.sheet_bind_group);
            self.sprite_renderer
                .draw_quad(&mut render_pass, 1, &self.ground_bind_group);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
