//! Render pipeline construction shared by the sub-renderers

/// Color and depth targets every scene pipeline draws into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargets {
    pub color: wgpu::TextureFormat,
    pub depth: wgpu::TextureFormat,
    pub sample_count: u32,
}

/// What differs between the map, sprite and arrow pipelines.
///
/// Shaders use `vs_main`/`fs_main` entry points. Depth is always written and
/// tested with `Less`.
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub shader: &'a str,
    /// Camera layout first, at group 0
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub vertex_layouts: &'a [wgpu::VertexBufferLayout<'a>],
    pub topology: wgpu::PrimitiveTopology,
    pub cull_mode: Option<wgpu::Face>,
    pub blend: wgpu::BlendState,
}

impl PipelineDesc<'_> {
    pub fn build(&self, device: &wgpu::Device, targets: RenderTargets) -> wgpu::RenderPipeline {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.label),
            source: wgpu::ShaderSource::Wgsl(self.shader.into()),
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(self.label),
            bind_group_layouts: self.bind_group_layouts,
            push_constant_ranges: &[],
        });

        let color_targets = [Some(wgpu::ColorTargetState {
            format: targets.color,
            blend: Some(self.blend),
            write_mask: wgpu::ColorWrites::ALL,
        })];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: self.vertex_layouts,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &color_targets,
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: self.topology,
                cull_mode: self.cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: targets.depth,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: targets.sample_count.max(1),
                ..Default::default()
            },
            multiview: None,
            cache: None,
        })
    }
}

/// Bind the camera uniform buffer at binding 0 of `layout`.
pub fn create_camera_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}
