use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::PixelBuffer;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TexelError, TexelResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A loaded font face at a fixed pixel size.
#[derive(Clone)]
pub struct Font {
    bytes: Arc<Vec<u8>>,
    size_px: f32,
    path: PathBuf,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("path", &self.path)
            .field("size_px", &self.size_px)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl Font {
    /// Read a TTF/OTF file and bind it to `size_px`.
    pub fn from_file(path: impl AsRef<Path>, size_px: f32) -> TexelResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TexelError::decode(path, e))?;
        Self::from_bytes(bytes, size_px, path)
    }

    /// Bind in-memory font bytes to `size_px`; `origin` names the source in errors.
    pub fn from_bytes(
        bytes: Vec<u8>,
        size_px: f32,
        origin: impl Into<PathBuf>,
    ) -> TexelResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TexelError::config("font size_px must be finite and > 0"));
        }
        let path = origin.into();
        if bytes.is_empty() {
            return Err(TexelError::decode(path, "font file is empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            size_px,
            path,
        })
    }

    /// Pixel size the font renders at.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Where the font came from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Turns a string into pixels.
pub trait TextRasterizer {
    /// Render `text` with `font` and `color` into straight RGBA8.
    ///
    /// Text that lays out to zero width or height is a [`TexelError::Rasterize`].
    fn rasterize(&mut self, text: &str, font: &Font, color: Rgba8) -> TexelResult<PixelBuffer>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    last_family_name: Option<String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            last_family_name: None,
        }
    }

    /// Return last successfully resolved family name, if any.
    pub fn last_family_name(&self) -> Option<&str> {
        self.last_family_name.as_deref()
    }

    /// Shape and lay out a single paragraph of plain text.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> TexelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TexelError::config("text size_px must be finite and > 0"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TexelError::rasterize("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TexelError::rasterize("registered font family has no name"))?
            .to_string();
        self.last_family_name = Some(family_name.clone());

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// [`TextRasterizer`] that shapes with Parley and fills glyphs with `vello_cpu`.
#[derive(Default)]
pub struct ParleyTextRasterizer {
    engine: TextLayoutEngine,
}

impl ParleyTextRasterizer {
    /// Construct a rasterizer with fresh layout state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextRasterizer for ParleyTextRasterizer {
    #[tracing::instrument(skip(self, font), fields(font = %font.path().display()))]
    fn rasterize(&mut self, text: &str, font: &Font, color: Rgba8) -> TexelResult<PixelBuffer> {
        if text.is_empty() {
            return Err(TexelError::rasterize("text has zero width"));
        }

        let layout = self
            .engine
            .layout_plain(text, font.bytes(), font.size_px(), color.into())?;
        let width = layout.width().ceil();
        let height = layout.height().ceil();
        if !(width >= 1.0 && height >= 1.0) {
            return Err(TexelError::rasterize(format!(
                "text {text:?} has zero width"
            )));
        }
        let w: u16 = (width as u32)
            .try_into()
            .map_err(|_| TexelError::rasterize("text width exceeds u16"))?;
        let h: u16 = (height as u32)
            .try_into()
            .map_err(|_| TexelError::rasterize("text height exceeds u16"))?;

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let mut rgba8 = pixmap.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut rgba8);
        PixelBuffer::from_rgba8(u32::from(w), u32::from(h), rgba8)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
