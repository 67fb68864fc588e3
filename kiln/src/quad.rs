use glyph_brush::{
    ab_glyph::{Font, FontArc, PxScale},
    BrushAction, BrushError, GlyphBrushBuilder, GlyphCruncher, Section,
};
use miniquad::*;
use palette::LinSrgba;

use crate::{math::Vec2, RenderingContext};

/// One instanced quad: a screen rect, the uv rect it samples, and a color.
#[derive(Clone)]
#[repr(C)]
struct Instance {
    rect: [f32; 4],
    uv: [f32; 4],
    color: [f32; 4],
}

type GlyphBrush = glyph_brush::GlyphBrush<(Instance, usize)>;

mod shader {
    use crate::math::Vec2;
    use miniquad::*;

    pub const VERTEX: &str = r#"#version 100
    attribute vec2 vert_pos;

    attribute vec4 inst_rect;
    attribute vec4 inst_uv;
    attribute vec4 inst_color;

    uniform vec2 screen_size;

    varying lowp vec2 texcoord;
    varying lowp vec4 color;

    void main() {
        vec2 pos = inst_rect.xy + (vert_pos * inst_rect.zw);
        gl_Position = vec4((pos / screen_size * 2.0 - 1.0) * vec2(1.0, -1.0), 0.0, 1.0);
        texcoord = inst_uv.xy + (vert_pos * inst_uv.zw);
        color = inst_color;
    }"#;

    pub const FRAGMENT: &str = r#"#version 100
    varying lowp vec2 texcoord;
    varying lowp vec4 color;

    uniform sampler2D mask;

    void main() {
        mediump float alpha = texture2D(mask, texcoord).r;
        if (alpha <= 0.0) {
            discard;
        }
        gl_FragColor = color * vec4(1.0, 1.0, 1.0, alpha);
    }"#;

    pub fn meta() -> ShaderMeta {
        ShaderMeta {
            images: vec!["mask".to_string()],
            uniforms: UniformBlockLayout {
                uniforms: vec![UniformDesc::new("screen_size", UniformType::Float2)],
            },
        }
    }

    pub fn attributes() -> [VertexAttribute; 4] {
        [
            VertexAttribute::with_buffer("vert_pos", VertexFormat::Float2, 0),
            VertexAttribute::with_buffer("inst_rect", VertexFormat::Float4, 1),
            VertexAttribute::with_buffer("inst_uv", VertexFormat::Float4, 1),
            VertexAttribute::with_buffer("inst_color", VertexFormat::Float4, 1),
        ]
    }

    #[repr(C)]
    pub struct Uniforms {
        pub screen_size: Vec2,
    }
}

// Rect and text instances are queued into alternating ranges so a draw
// call per range reproduces the queueing order. Text ranges index into
// per-layer glyph instance lists kept by the brush cache.
enum InstanceRange {
    Rects(std::ops::Range<usize>),
    Text(usize),
}

/// Instanced quad renderer for filled rects and glyph text: the `kiln`
/// implementation of the `glaze` rendering seam. Rects sample a solid
/// white mask; text samples the glyph cache texture.
pub struct QuadRenderer {
    instances: Vec<Instance>,
    instance_ranges: Vec<InstanceRange>,
    text_layers: usize,
    screen_size: Vec2,
    pipeline: Pipeline,
    vertex_buffer: BufferId,
    instance_buffer: BufferId,
    index_buffer: BufferId,
    white_pixel: TextureId,
    glyph_brush: GlyphBrush,
    glyph_texture: TextureId,
    glyph_instances: Vec<Vec<Instance>>,
}

impl QuadRenderer {
    fn new_glyph_texture(context: &mut RenderingContext, (width, height): (u32, u32)) -> TextureId {
        context.new_texture(
            TextureAccess::Static,
            TextureSource::Empty,
            TextureParams {
                kind: TextureKind::Texture2D,
                format: TextureFormat::Alpha,
                wrap: TextureWrap::Clamp,
                min_filter: FilterMode::Linear,
                mag_filter: FilterMode::Linear,
                mipmap_filter: MipmapFilterMode::None,
                width,
                height,
                allocate_mipmaps: false,
                sample_count: 1,
            },
        )
    }

    pub fn new(context: &mut RenderingContext, fonts: Vec<FontArc>) -> Self {
        // Unit quad, scaled and translated per instance in the shader.
        let vertices = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];
        let vertex_buffer = context.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = context.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );
        let instance_buffer = context.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Stream,
            BufferSource::empty::<Instance>(1024),
        );

        let shader = context
            .new_shader(
                ShaderSource::Glsl {
                    vertex: shader::VERTEX,
                    fragment: shader::FRAGMENT,
                },
                shader::meta(),
            )
            .unwrap();
        let pipeline = context.new_pipeline(
            &[
                BufferLayout::default(),
                BufferLayout {
                    step_func: VertexStep::PerInstance,
                    ..Default::default()
                },
            ],
            &shader::attributes(),
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                ..Default::default()
            },
        );

        let white_pixel = context.new_texture_from_rgba8(1, 1, &[255; 4]);
        let glyph_brush = GlyphBrushBuilder::using_fonts(fonts).build();
        let glyph_texture = Self::new_glyph_texture(context, glyph_brush.texture_dimensions());

        QuadRenderer {
            instances: Vec::new(),
            instance_ranges: Vec::new(),
            text_layers: 0,
            screen_size: Vec2::ONE,
            pipeline,
            vertex_buffer,
            instance_buffer,
            index_buffer,
            white_pixel,
            glyph_brush,
            glyph_texture,
            glyph_instances: Vec::new(),
        }
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_size = Vec2::new(width, height);
    }

    fn process_queued_text(&mut self, context: &mut RenderingContext) {
        let action = loop {
            let result = self.glyph_brush.process_queued(
                |rect, alpha_data| {
                    context.texture_update_part(
                        self.glyph_texture,
                        rect.min[0] as i32,
                        rect.min[1] as i32,
                        rect.width() as i32,
                        rect.height() as i32,
                        alpha_data,
                    );
                },
                |vertex| {
                    let pos = vertex.pixel_coords;
                    let uv = vertex.tex_coords;
                    (
                        Instance {
                            rect: [pos.min.x, pos.min.y, pos.width(), pos.height()],
                            uv: [uv.min.x, uv.min.y, uv.width(), uv.height()],
                            color: vertex.extra.color,
                        },
                        vertex.extra.z as usize,
                    )
                },
            );
            match result {
                Ok(action) => break action,
                Err(BrushError::TextureTooSmall { suggested, .. }) => {
                    // The cache texture cannot fit all queued glyphs.
                    println!("Resizing glyph texture to {}x{}", suggested.0, suggested.1);
                    self.glyph_texture = Self::new_glyph_texture(context, suggested);
                    self.glyph_brush.resize_texture(suggested.0, suggested.1);
                }
            }
        };

        match action {
            BrushAction::Draw(glyphs) => {
                self.glyph_instances.clear();
                self.glyph_instances.resize(self.text_layers, Vec::new());
                for (instance, layer) in glyphs {
                    self.glyph_instances[layer].push(instance);
                }
            }
            // Same text as the previous frame; keep the stored instances.
            BrushAction::ReDraw => {}
        }
    }

    pub fn render(&mut self, context: &mut RenderingContext) {
        self.process_queued_text(context);
        context.apply_pipeline(&self.pipeline);
        context.apply_uniforms(UniformsSource::table(&shader::Uniforms {
            screen_size: self.screen_size,
        }));
        let mut bindings = Bindings {
            vertex_buffers: vec![self.vertex_buffer, self.instance_buffer],
            index_buffer: self.index_buffer,
            images: vec![self.white_pixel],
        };
        for instance_range in self.instance_ranges.drain(..) {
            let (image, instances) = match &instance_range {
                InstanceRange::Rects(range) => {
                    (self.white_pixel, &self.instances[range.clone()])
                }
                InstanceRange::Text(layer) => {
                    (self.glyph_texture, self.glyph_instances[*layer].as_slice())
                }
            };
            if instances.is_empty() {
                continue;
            }
            context.buffer_update(self.instance_buffer, BufferSource::slice(instances));
            bindings.images[0] = image;
            context.apply_bindings(&bindings);
            context.draw(0, 6, instances.len() as i32);
        }
        self.instances.clear();
        self.text_layers = 0;
    }

    pub fn render_pass(&mut self, context: &mut RenderingContext) {
        context.begin_default_pass(Default::default());
        self.render(context);
        context.end_render_pass();
    }
}

impl glaze::Renderer for QuadRenderer {
    fn queue_rect(&mut self, rect: glaze::Rect, color: LinSrgba) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let max = rect.position + rect.size;
        if max.x < 0.0
            || max.y < 0.0
            || rect.x() >= self.screen_size.x
            || rect.y() >= self.screen_size.y
        {
            // Entirely offscreen.
            return;
        }

        self.instances.push(Instance {
            rect: [rect.x(), rect.y(), rect.width(), rect.height()],
            uv: [0.0, 0.0, 1.0, 1.0],
            color: color.into(),
        });
        match self.instance_ranges.last_mut() {
            Some(InstanceRange::Rects(range)) => range.end += 1,
            _ => {
                let end = self.instances.len();
                self.instance_ranges.push(InstanceRange::Rects(end - 1..end));
            }
        }
    }

    fn queue_text(&mut self, mut section: Section) {
        // Consecutive text sections share one layer; a rect in between
        // starts a new one.
        let layer = match self.instance_ranges.last() {
            Some(InstanceRange::Text(layer)) => *layer,
            _ => {
                let layer = self.text_layers;
                self.text_layers += 1;
                self.instance_ranges.push(InstanceRange::Text(layer));
                layer
            }
        };
        for text in section.text.iter_mut() {
            text.extra.z = layer as f32;
        }
        self.glyph_brush.queue(section);
    }

    fn pt_to_px_scale(&self, font: glaze::FontId, pt_size: f32) -> PxScale {
        let font = self
            .glyph_brush
            .fonts()
            .get(font.0)
            .expect("invalid FontId");
        font.pt_to_px_scale(pt_size).unwrap()
    }
}
