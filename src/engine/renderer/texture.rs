// Texture loading and management system

use anyhow::Result;
use image::GenericImageView;

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// A loaded texture with GPU resources and its ready-made bind group
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba8(
            device,
            queue,
            layout,
            &rgba,
            width,
            height,
            wgpu::FilterMode::Linear,
            Some(label),
        )
    }

    /// Create a solid color texture (fallback for untextured quads)
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        color: [u8; 4],
        label: Option<&str>,
    ) -> Result<Self> {
        Self::from_rgba8(
            device,
            queue,
            layout,
            &color,
            1,
            1,
            wgpu::FilterMode::Nearest,
            label,
        )
    }

    /// Create a texture from tightly packed RGBA pixels
    #[allow(clippy::too_many_arguments)]
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        pixels: &[u8],
        width: u32,
        height: u32,
        mag_filter: wgpu::FilterMode,
        label: Option<&str>,
    ) -> Result<Self> {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label,
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Ok(Self {
            texture,
            view,
            sampler,
            bind_group,
            width,
            height,
        })
    }
}

/// Owns every loaded texture and hands out handles
#[derive(Default)]
pub struct TextureManager {
    textures: Vec<Texture>,
}

impl TextureManager {
    /// Create an empty texture manager
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
        }
    }

    /// Register a texture and return its handle
    pub fn add(&mut self, texture: Texture) -> TextureHandle {
        let handle = TextureHandle::from_index(self.textures.len());
        self.textures.push(texture);
        handle
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }

    /// Get the number of loaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
