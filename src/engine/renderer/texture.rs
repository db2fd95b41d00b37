// Texture upload and management

use anyhow::Result;
use image::RgbaImage;
use std::collections::HashMap;

/// Handle to an uploaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub(crate) usize);

/// An uploaded texture with its GPU resources
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload an RGBA image to the GPU.
    ///
    /// Sampling is nearest-neighbour in both directions; the client draws
    /// pixel art at integer positions.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &RgbaImage,
        label: &str,
    ) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            anyhow::bail!("cannot upload zero-sized texture: {}", label);
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
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
            image,
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
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
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

/// Owns every uploaded texture and hands out handles
pub struct TextureManager {
    textures: Vec<Texture>,
    label_to_handle: HashMap<String, TextureHandle>,
}

impl TextureManager {
    /// Create an empty texture manager
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            label_to_handle: HashMap::new(),
        }
    }

    /// Upload an image and get a handle to it.
    ///
    /// Labels are only used for caching and debugging; uploading the same
    /// label twice returns the original handle.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        image: &RgbaImage,
        label: &str,
    ) -> Result<TextureHandle> {
        if let Some(&handle) = self.label_to_handle.get(label) {
            return Ok(handle);
        }

        let texture = Texture::from_rgba(device, queue, layout, image, label)?;
        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        self.label_to_handle.insert(label.to_string(), handle);
        Ok(handle)
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }

    /// Number of uploaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}
