//! Field rendering system.
//!
//! One render pass per frame: clear to the backdrop color, glow blobs,
//! then every particle disc, then every connection line. All elements are
//! semi-transparent and alpha-blended, so no stricter layering is needed.

use bytemuck::{Pod, Zeroable};
use field_core::constants::LAYER_OPACITY;
use field_core::Particle;

use crate::connections::{self, LineSegment};
use crate::glow::GlowRenderer;

/// Per-frame uniform shared by every pipeline (16 bytes, WGSL-compatible).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct FieldUniform {
    resolution: [f32; 2],
    time: f32,
    layer_alpha: f32,
}

/// Initial segment-buffer capacity per particle; the buffer is recreated
/// larger if a frame ever produces more.
const SEGMENTS_PER_PARTICLE: usize = 8;

pub struct FieldRenderer {
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    particle_pipeline: wgpu::RenderPipeline,
    particle_bind_group_layout: wgpu::BindGroupLayout,
    particle_buffer: wgpu::Buffer,
    particle_capacity: usize,

    line_pipeline: wgpu::RenderPipeline,
    line_bind_group_layout: wgpu::BindGroupLayout,
    segment_buffer: wgpu::Buffer,
    segment_capacity: usize,

    glow: GlowRenderer,

    clear_color: wgpu::Color,
}

impl FieldRenderer {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        initial_particles: usize,
    ) -> Self {
        // Shared uniform (resolution / time / layer opacity)
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Field Uniform Buffer"),
            size: std::mem::size_of::<FieldUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Field Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Field Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Particle disc pipeline
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Particle Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particle.wgsl").into()),
        });
        let (particle_bind_group_layout, particle_pipeline) =
            instanced_pipeline(device, "Particle", &particle_shader, config.format);

        // Connection line pipeline
        let line_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Connection Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/connection.wgsl").into()),
        });
        let (line_bind_group_layout, line_pipeline) =
            instanced_pipeline(device, "Connection", &line_shader, config.format);

        let glow = GlowRenderer::new(device, config.format, &uniform_bind_group_layout);

        let particle_capacity = initial_particles.max(1);
        let segment_capacity = (initial_particles * SEGMENTS_PER_PARTICLE).max(1);

        Self {
            uniform_buffer,
            uniform_bind_group,
            particle_pipeline,
            particle_bind_group_layout,
            particle_buffer: storage_buffer::<Particle>(device, "Particle Buffer", particle_capacity),
            particle_capacity,
            line_pipeline,
            line_bind_group_layout,
            segment_buffer: storage_buffer::<LineSegment>(device, "Segment Buffer", segment_capacity),
            segment_capacity,
            glow,
            clear_color: backdrop_color(),
        }
    }

    /// Draw one frame from the current particle set.
    ///
    /// The set is read-only here; the pair scan and all buffer uploads happen
    /// before the pass is opened. A zero-particle set renders just the
    /// backdrop.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_view: &wgpu::TextureView,
        particles: &[Particle],
        resolution: (u32, u32),
        elapsed: f32,
    ) {
        let segments = connections::collect_segments(particles);

        self.ensure_particle_capacity(device, particles.len());
        self.ensure_segment_capacity(device, segments.len());

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[FieldUniform {
                resolution: [resolution.0 as f32, resolution.1 as f32],
                time: elapsed,
                layer_alpha: LAYER_OPACITY,
            }]),
        );
        if !particles.is_empty() {
            queue.write_buffer(&self.particle_buffer, 0, bytemuck::cast_slice(particles));
        }
        if !segments.is_empty() {
            queue.write_buffer(&self.segment_buffer, 0, bytemuck::cast_slice(&segments));
        }

        // Per-frame bind groups keep buffer growth free of bookkeeping
        let particle_bind_group = self.instanced_bind_group(
            device,
            "Particle Bind Group",
            &self.particle_bind_group_layout,
            &self.particle_buffer,
        );
        let line_bind_group = self.instanced_bind_group(
            device,
            "Connection Bind Group",
            &self.line_bind_group_layout,
            &self.segment_buffer,
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Field Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Field Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: surface_view,
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

            self.glow.render(&mut render_pass, &self.uniform_bind_group);

            render_pass.set_pipeline(&self.particle_pipeline);
            render_pass.set_bind_group(0, &particle_bind_group, &[]);
            render_pass.draw(0..6, 0..particles.len() as u32);

            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_bind_group(0, &line_bind_group, &[]);
            render_pass.draw(0..6, 0..segments.len() as u32);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_particle_capacity(&mut self, device: &wgpu::Device, needed: usize) {
        if needed > self.particle_capacity {
            self.particle_capacity = needed.next_power_of_two();
            log::debug!("growing particle buffer to {} entries", self.particle_capacity);
            self.particle_buffer =
                storage_buffer::<Particle>(device, "Particle Buffer", self.particle_capacity);
        }
    }

    fn ensure_segment_capacity(&mut self, device: &wgpu::Device, needed: usize) {
        if needed > self.segment_capacity {
            self.segment_capacity = needed.next_power_of_two();
            log::debug!("growing segment buffer to {} entries", self.segment_capacity);
            self.segment_buffer =
                storage_buffer::<LineSegment>(device, "Segment Buffer", self.segment_capacity);
        }
    }

    fn instanced_bind_group(
        &self,
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        instances: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: instances.as_entire_binding(),
                },
            ],
        })
    }
}

/// Uniform + read-only instance storage, the layout both instanced pipelines
/// share.
fn instanced_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
) -> (wgpu::BindGroupLayout, wgpu::RenderPipeline) {
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Bind Group Layout")),
        entries: &[
            // Field uniform - Binding 0
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            // Instances (Storage) - Binding 1
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} Pipeline Layout")),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Render Pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vertex"),
            buffers: &[],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fragment"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    (bind_group_layout, pipeline)
}

fn storage_buffer<T>(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity * std::mem::size_of::<T>()) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// The page backdrop the field floats over: Catppuccin Mocha base.
fn backdrop_color() -> wgpu::Color {
    let base = catppuccin::PALETTE.mocha.colors.base;
    wgpu::Color {
        r: srgb_channel_to_linear(base.rgb.r),
        g: srgb_channel_to_linear(base.rgb.g),
        b: srgb_channel_to_linear(base.rgb.b),
        a: 1.0,
    }
}

/// sRGB u8 channel to linear, standard piecewise transfer function.
fn srgb_channel_to_linear(c: u8) -> f64 {
    let x = c as f64 / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}
