// Rendering system using wgpu

pub mod camera;
pub mod scene;
pub mod sprite;
pub mod text;
pub mod texture;
mod vertex;

pub use camera::{Camera, CameraUniform};
pub use scene::{Color, Scene, SpriteSlot, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use sprite::SpriteRenderer;
pub use text::PixelFont;
pub use texture::{Texture, TextureHandle, TextureManager};
pub use vertex::Vertex;

use crate::engine::assets::SpriteCatalog;
use anyhow::Result;
use log::info;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Main renderer responsible for initializing wgpu and drawing frames
///
/// The simulation hands over a [`Scene`] once per frame; the renderer clears
/// the target, batches the scene into quads, and draws them in submission
/// order.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    camera: Camera,
    sprite_renderer: SpriteRenderer,
    textures: TextureManager,
    font: PixelFont,
    font_texture: TextureHandle,
    white_texture: TextureHandle,
}

impl Renderer {
    /// Create a new renderer for the given window
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        // Request device and queue
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

        // Configure surface
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

        // The logical canvas never changes size; the window scales it
        let camera = Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT);

        // Create quad pipeline
        let sprite_renderer = SpriteRenderer::new(&device, &config, &camera)?;

        // Built-in textures: 1x1 white for solid fills, the glyph atlas for text
        let mut textures = TextureManager::new();
        let white_texture = textures.add(Texture::from_color(
            &device,
            &queue,
            sprite_renderer.texture_layout(),
            [255, 255, 255, 255],
            Some("white"),
        )?);

        let font = PixelFont::new();
        let (atlas_w, atlas_h) = font.atlas_size();
        let font_texture = textures.add(Texture::from_rgba8(
            &device,
            &queue,
            sprite_renderer.texture_layout(),
            font.atlas_rgba(),
            atlas_w,
            atlas_h,
            wgpu::FilterMode::Nearest,
            Some("pixel font"),
        )?);

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
            camera,
            sprite_renderer,
            textures,
            font,
            font_texture,
            white_texture,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Load a texture from encoded image bytes and return its handle
    pub fn load_texture(&mut self, bytes: &[u8], label: &str) -> Result<TextureHandle> {
        let texture = Texture::from_bytes(
            &self.device,
            &self.queue,
            self.sprite_renderer.texture_layout(),
            bytes,
            label,
        )?;
        Ok(self.textures.add(texture))
    }

    /// Render one frame from the given draw list
    pub fn render(&mut self, scene: &Scene, catalog: &SpriteCatalog) -> Result<()> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mesh = sprite::build_mesh(
            scene,
            catalog,
            &self.font,
            self.font_texture,
            self.white_texture,
        );

        // Camera is constant, but a frame's upload is cheap and keeps the
        // buffer correct across surface reconfiguration
        self.queue.write_buffer(
            self.sprite_renderer.camera_buffer(),
            0,
            bytemuck::cast_slice(&[CameraUniform::new(&self.camera)]),
        );

        let buffers = if mesh.is_empty() {
            None
        } else {
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Frame Vertex Buffer"),
                    contents: bytemuck::cast_slice(&mesh.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Frame Index Buffer"),
                    contents: bytemuck::cast_slice(&mesh.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            Some((vertex_buffer, index_buffer))
        };

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
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 1.0,
                            g: 1.0,
                            b: 1.0,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some((vertex_buffer, index_buffer)) = &buffers {
                render_pass.set_pipeline(self.sprite_renderer.pipeline());
                render_pass.set_bind_group(0, self.sprite_renderer.camera_bind_group(), &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);

                for batch in &mesh.batches {
                    if let Some(texture) = self.textures.get(batch.texture) {
                        render_pass.set_bind_group(1, &texture.bind_group, &[]);
                        render_pass.draw_indexed(
                            batch.first_index..batch.first_index + batch.index_count,
                            0,
                            0..1,
                        );
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get the surface format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Get the number of loaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.texture_count()
    }
}
