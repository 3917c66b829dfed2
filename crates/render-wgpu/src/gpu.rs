use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use learngl_render::{
    BufferMode, PolygonMode, QUAD_INDICES, QUAD_VERTICES, ShaderError, ShaderStage,
    TriangleScene, check_and_log,
};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Uniforms {
    transform: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
}

fn quad_vertices() -> Vec<Vertex> {
    QUAD_VERTICES
        .iter()
        .map(|&position| Vertex { position })
        .collect()
}

/// Device features to request so wireframe can be toggled on.
pub fn wireframe_features(adapter_features: wgpu::Features) -> wgpu::Features {
    adapter_features & wgpu::Features::POLYGON_MODE_LINE
}

/// The polygon mode the device can actually draw.
pub fn effective_polygon_mode(
    requested: PolygonMode,
    device_features: wgpu::Features,
) -> PolygonMode {
    if requested == PolygonMode::Line
        && !device_features.contains(wgpu::Features::POLYGON_MODE_LINE)
    {
        tracing::warn!("device lacks POLYGON_MODE_LINE, drawing filled polygons");
        return PolygonMode::Fill;
    }
    requested
}

fn to_wgpu(mode: PolygonMode) -> wgpu::PolygonMode {
    match mode {
        PolygonMode::Fill => wgpu::PolygonMode::Fill,
        PolygonMode::Line => wgpu::PolygonMode::Line,
    }
}

/// Compile one shader stage inside a validation error scope.
fn compile_shader(
    device: &wgpu::Device,
    stage: ShaderStage,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(match stage {
            ShaderStage::Vertex => "vertex_shader",
            ShaderStage::Fragment => "fragment_shader",
        }),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(e) => Err(ShaderError::Compilation {
            stage,
            log: e.to_string(),
        }),
        None => Ok(module),
    }
}

/// wgpu-based hello triangle renderer.
pub struct WgpuRenderer {
    pipeline: Option<wgpu::RenderPipeline>,
    pipeline_layout: wgpu::PipelineLayout,
    /// Vertex and fragment modules, absent if either failed to compile.
    shaders: Option<(wgpu::ShaderModule, wgpu::ShaderModule)>,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    buffer_mode: BufferMode,
    polygon_mode: PolygonMode,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        buffer_mode: BufferMode,
        polygon_mode: PolygonMode,
    ) -> Self {
        // Uniform buffer
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms {
                transform: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // A failed stage is logged; without both stages there is no pipeline
        // and frames are only cleared.
        let vertex_shader =
            check_and_log(compile_shader(device, ShaderStage::Vertex, shaders::VERTEX_SHADER));
        let fragment_shader = check_and_log(compile_shader(
            device,
            ShaderStage::Fragment,
            shaders::FRAGMENT_SHADER,
        ));
        let shaders = vertex_shader.zip(fragment_shader);

        // Vertex buffer always holds all four corners.
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&quad_vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = buffer_mode.uses_index_buffer().then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("index_buffer"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let polygon_mode = effective_polygon_mode(polygon_mode, device.features());

        let mut renderer = Self {
            pipeline: None,
            pipeline_layout,
            shaders,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            buffer_mode,
            polygon_mode,
            surface_format,
        };
        renderer.rebuild_pipeline(device);
        tracing::debug!(
            "triangle renderer ready: buffer={} polygon={:?}",
            buffer_mode.label(),
            renderer.polygon_mode
        );
        renderer
    }

    pub fn polygon_mode(&self) -> PolygonMode {
        self.polygon_mode
    }

    /// Switch between fill and wireframe and rebuild the pipeline.
    pub fn set_polygon_mode(&mut self, device: &wgpu::Device, mode: PolygonMode) {
        let mode = effective_polygon_mode(mode, device.features());
        if mode == self.polygon_mode {
            return;
        }
        self.polygon_mode = mode;
        self.rebuild_pipeline(device);
    }

    /// Build the render pipeline (the program link step) inside an error scope.
    fn rebuild_pipeline(&mut self, device: &wgpu::Device) {
        let Some((vertex_shader, fragment_shader)) = &self.shaders else {
            return;
        };
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle_pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: vertex_shader,
                entry_point: Some(shaders::VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: fragment_shader,
                entry_point: Some(shaders::FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                polygon_mode: to_wgpu(self.polygon_mode),
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });
        let linked = match pollster::block_on(device.pop_error_scope()) {
            Some(e) => Err(ShaderError::Link { log: e.to_string() }),
            None => Ok(pipeline),
        };
        self.pipeline = check_and_log(linked);
    }

    /// Render one frame: clear, then draw the triangle (or quad).
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &TriangleScene,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms {
                transform: scene.transform.to_cols_array_2d(),
            }),
        );

        let c = scene.clear_color;
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: c.r,
                            g: c.g,
                            b: c.b,
                            a: c.a,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if let Some(pipeline) = &self.pipeline {
                pass.set_pipeline(pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                let count = self.buffer_mode.draw_count();
                match &self.index_buffer {
                    Some(index_buffer) => {
                        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..count, 0, 0..1);
                    }
                    None => pass.draw(0..count, 0..1),
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpu_layouts_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 3 * std::mem::size_of::<f32>());
        assert_eq!(std::mem::size_of::<Uniforms>(), 64);
    }

    #[test]
    fn quad_upload_matches_geometry() {
        let verts = quad_vertices();
        assert_eq!(verts.len(), 4);
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 4 * 12);
        assert_eq!(verts[2].position, [-0.5, -0.5, 0.0]);
    }

    #[test]
    fn line_mode_needs_feature() {
        assert_eq!(
            effective_polygon_mode(PolygonMode::Line, wgpu::Features::empty()),
            PolygonMode::Fill
        );
        assert_eq!(
            effective_polygon_mode(PolygonMode::Line, wgpu::Features::POLYGON_MODE_LINE),
            PolygonMode::Line
        );
        assert_eq!(
            effective_polygon_mode(PolygonMode::Fill, wgpu::Features::empty()),
            PolygonMode::Fill
        );
    }

    #[test]
    fn wireframe_features_only_requests_line_mode() {
        let adapter = wgpu::Features::POLYGON_MODE_LINE | wgpu::Features::DEPTH_CLIP_CONTROL;
        assert_eq!(wireframe_features(adapter), wgpu::Features::POLYGON_MODE_LINE);
        assert_eq!(
            wireframe_features(wgpu::Features::DEPTH_CLIP_CONTROL),
            wgpu::Features::empty()
        );
    }
}
