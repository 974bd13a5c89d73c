// Quad rendering: pipeline setup and per-frame batching

use super::camera::{Camera, CameraUniform};
use super::scene::{DrawCommand, Scene};
use super::text::PixelFont;
use super::texture::TextureHandle;
use super::vertex::Vertex;
use crate::core::math::Rect;
use crate::engine::assets::SpriteCatalog;
use anyhow::Result;
use glam::Vec2;
use wgpu::util::DeviceExt;

/// A run of consecutive quads sharing one texture binding
#[derive(Debug, Clone, Copy)]
pub struct QuadBatch {
    pub texture: TextureHandle,
    pub first_index: u32,
    pub index_count: u32,
}

/// The frame's geometry, ready for upload
#[derive(Debug, Default)]
pub struct QuadMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub batches: Vec<QuadBatch>,
}

impl QuadMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Pipeline and shared GPU state for quad rendering
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
}

impl SpriteRenderer {
    /// Create the quad pipeline for the given surface configuration
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera: &Camera,
    ) -> Result<Self> {
        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Create camera bind group layout
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

        // Create texture bind group layout
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

        // Create pipeline layout
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        // Create render pipeline
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

        // Create camera buffer
        let camera_uniform = CameraUniform::new(camera);
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
            texture_bind_group_layout,
        })
    }

    pub fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.render_pipeline
    }

    pub fn camera_buffer(&self) -> &wgpu::Buffer {
        &self.camera_buffer
    }

    pub fn camera_bind_group(&self) -> &wgpu::BindGroup {
        &self.camera_bind_group
    }

    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_bind_group_layout
    }
}

/// Turn a frame's draw list into upload-ready quads
///
/// Fill rects bind the 1x1 white texture and carry their color per vertex;
/// blits whose slot has no loaded texture are skipped; text runs become one
/// quad per glyph from the font atlas. Consecutive quads with the same
/// texture merge into a single batch.
pub fn build_mesh(
    scene: &Scene,
    catalog: &SpriteCatalog,
    font: &PixelFont,
    font_texture: TextureHandle,
    white_texture: TextureHandle,
) -> QuadMesh {
    const FULL_UV: (Vec2, Vec2) = (Vec2::ZERO, Vec2::ONE);
    const NO_TINT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    let mut mesh = QuadMesh::default();

    for command in scene.commands() {
        match command {
            DrawCommand::FillRect { rect, color } => {
                push_quad(&mut mesh, white_texture, *rect, FULL_UV, color.to_array());
            }
            DrawCommand::Blit { slot, rect } => {
                // Not-yet-loaded slots draw nothing
                if let Some(handle) = catalog.resolve(*slot) {
                    push_quad(&mut mesh, handle, *rect, FULL_UV, NO_TINT);
                }
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
            } => {
                let (glyph_w, glyph_h) = PixelFont::glyph_quad_size(*size);
                let advance = PixelFont::advance(*size);
                let mut pen = *x;
                for ch in text.chars() {
                    if let Some(region) = font.glyph(ch) {
                        push_quad(
                            &mut mesh,
                            font_texture,
                            Rect::new(pen, *y, glyph_w, glyph_h),
                            (region.uv_min, region.uv_max),
                            color.to_array(),
                        );
                    }
                    pen += advance;
                }
            }
        }
    }

    mesh
}

fn push_quad(
    mesh: &mut QuadMesh,
    texture: TextureHandle,
    rect: Rect,
    (uv_min, uv_max): (Vec2, Vec2),
    color: [f32; 4],
) {
    let base = mesh.vertices.len() as u16;
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.y + rect.height);

    mesh.vertices.extend_from_slice(&[
        Vertex::new([x0, y0], [uv_min.x, uv_min.y], color),
        Vertex::new([x1, y0], [uv_max.x, uv_min.y], color),
        Vertex::new([x1, y1], [uv_max.x, uv_max.y], color),
        Vertex::new([x0, y1], [uv_min.x, uv_max.y], color),
    ]);

    let first_index = mesh.indices.len() as u32;
    mesh.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);

    match mesh.batches.last_mut() {
        Some(batch) if batch.texture == texture => batch.index_count += 6,
        _ => mesh.batches.push(QuadBatch {
            texture,
            first_index,
            index_count: 6,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::scene::{Color, SpriteSlot};

    fn handles() -> (TextureHandle, TextureHandle) {
        (TextureHandle::from_index(0), TextureHandle::from_index(1))
    }

    #[test]
    fn test_fill_rect_becomes_one_quad() {
        let (white, font_tex) = handles();
        let font = PixelFont::new();
        let mut scene = Scene::new();
        scene.fill_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Color::RED);

        let mesh = build_mesh(&scene, &SpriteCatalog::empty(), &font, font_tex, white);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.batches.len(), 1);
        assert_eq!(mesh.batches[0].texture, white);

        // Corners span the rect
        assert_eq!(mesh.vertices[0].position, [10.0, 20.0]);
        assert_eq!(mesh.vertices[2].position, [40.0, 60.0]);
    }

    #[test]
    fn test_unloaded_blit_is_skipped() {
        let (white, font_tex) = handles();
        let font = PixelFont::new();
        let mut scene = Scene::new();
        scene.blit(SpriteSlot::Cloud, 0.0, 0.0, 200.0, 90.0);

        let mesh = build_mesh(&scene, &SpriteCatalog::empty(), &font, font_tex, white);
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_loaded_blit_uses_slot_texture() {
        let (white, font_tex) = handles();
        let cloud_tex = TextureHandle::from_index(2);
        let font = PixelFont::new();
        let mut catalog = SpriteCatalog::empty();
        catalog.set_cloud(Some(cloud_tex));

        let mut scene = Scene::new();
        scene.blit(SpriteSlot::Cloud, 0.0, 0.0, 200.0, 90.0);

        let mesh = build_mesh(&scene, &catalog, &font, font_tex, white);
        assert_eq!(mesh.batches.len(), 1);
        assert_eq!(mesh.batches[0].texture, cloud_tex);
    }

    #[test]
    fn test_same_texture_quads_merge_into_one_batch() {
        let (white, font_tex) = handles();
        let font = PixelFont::new();
        let mut scene = Scene::new();
        scene.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        scene.fill_rect(Rect::new(20.0, 0.0, 10.0, 10.0), Color::GREEN);

        let mesh = build_mesh(&scene, &SpriteCatalog::empty(), &font, font_tex, white);
        assert_eq!(mesh.batches.len(), 1);
        assert_eq!(mesh.batches[0].index_count, 12);
    }

    #[test]
    fn test_text_emits_one_quad_per_visible_glyph() {
        let (white, font_tex) = handles();
        let font = PixelFont::new();
        let mut scene = Scene::new();
        scene.text("ab c", 0.0, 0.0, 14.0, Color::BLACK);

        // Space advances the pen but draws nothing
        let mesh = build_mesh(&scene, &SpriteCatalog::empty(), &font, font_tex, white);
        assert_eq!(mesh.vertices.len(), 3 * 4);
        assert_eq!(mesh.batches.len(), 1);
        assert_eq!(mesh.batches[0].texture, font_tex);

        // The glyph after the space starts three advances in
        let advance = PixelFont::advance(14.0);
        let c_quad_x = mesh.vertices[8].position[0];
        assert!((c_quad_x - 3.0 * advance).abs() < 1e-4);
    }

    #[test]
    fn test_batches_split_on_texture_change() {
        let (white, font_tex) = handles();
        let font = PixelFont::new();
        let mut scene = Scene::new();
        scene.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::RED);
        scene.text("a", 0.0, 0.0, 14.0, Color::BLACK);
        scene.fill_rect(Rect::new(0.0, 20.0, 10.0, 10.0), Color::GREEN);

        let mesh = build_mesh(&scene, &SpriteCatalog::empty(), &font, font_tex, white);
        assert_eq!(mesh.batches.len(), 3);
        assert_eq!(mesh.batches[1].first_index, 6);
        assert_eq!(mesh.batches[2].first_index, 12);
    }
}
