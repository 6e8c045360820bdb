// this_file: crates/uitext/src/context.rs

//! One object that owns font lookup, glyph loading and line rendering

use std::path::Path;
use std::sync::Arc;

use uitext_core::{Bitmap, Config, FaceStyle, FontDescriptor, FontResolver, MainFace, Result};
use uitext_engine::{Diagnostic, Face, GlyphEngine};
use uitext_fontdb::SystemFontResolver;
use uitext_render::{Canvas, LineLayout, LineParams, LineRenderer};

/// Font resolution, face loading and rendering behind one handle
///
/// Every context has its own resolver and therefore its own main face.
/// The glyph engine is the process-wide one unless a context is built
/// with [`TextContext::isolated`] or [`TextContext::from_parts`].
#[derive(Debug, Clone)]
pub struct TextContext {
    resolver: Arc<SystemFontResolver>,
    renderer: LineRenderer,
}

impl TextContext {
    /// Index fonts per `config` and share the process-wide engine
    pub fn new(config: &Config) -> Self {
        Self::from_parts(SystemFontResolver::new(config), GlyphEngine::shared())
    }

    /// Like [`TextContext::new`] but with a private engine and face cache
    pub fn isolated(config: &Config) -> Self {
        Self::from_parts(
            SystemFontResolver::new(config),
            Arc::new(GlyphEngine::new(config)),
        )
    }

    /// Configuration from `UITEXT_*` environment variables
    pub fn from_env() -> Self {
        Self::new(&Config::from_env())
    }

    pub fn from_parts(resolver: SystemFontResolver, engine: Arc<GlyphEngine>) -> Self {
        log::debug!(
            "Text context over {} faces, engine caching {}",
            resolver.face_count(),
            engine.stats().capacity
        );
        let resolver = Arc::new(resolver);
        let renderer = LineRenderer::new(resolver.clone(), engine);
        Self { resolver, renderer }
    }

    pub fn resolver(&self) -> &SystemFontResolver {
        &self.resolver
    }

    pub fn engine(&self) -> &Arc<GlyphEngine> {
        self.renderer.engine()
    }

    pub fn renderer(&self) -> &LineRenderer {
        &self.renderer
    }

    /// Render one line of `text` into `canvas`
    pub fn render_single_line(
        &self,
        text: &str,
        params: &LineParams,
        canvas: &mut Canvas<'_>,
    ) -> Result<()> {
        self.renderer.render_single_line(text, params, canvas)
    }

    /// Lay `text` out without drawing it
    pub fn layout(&self, text: &str, size_px: u32, available: Option<f32>) -> Result<LineLayout> {
        self.renderer.layout(text, size_px, available)
    }

    /// Resolve a family (or the main face family, for `None`) in `style`
    pub fn information_for_font_family(
        &self,
        family: Option<&str>,
        style: FaceStyle,
    ) -> Result<FontDescriptor> {
        self.resolver.information_for_font_family(family, style)
    }

    /// Load face `index` from the font file at `path`
    pub fn native_face_from_path(&self, path: impl AsRef<Path>, index: u32) -> Result<Arc<Face>> {
        Ok(self.engine().native_face_from_path(path, index)?)
    }

    /// A face that can draw `ch`, color faces first when `prefer_color`
    pub fn fallback_font(
        &self,
        ch: char,
        family: Option<&str>,
        style: FaceStyle,
        prefer_color: bool,
    ) -> Result<FontDescriptor> {
        self.resolver.fallback_font(ch, family, style, prefer_color)
    }

    /// Expand a 1-bit bitmap to 8-bit coverage
    pub fn convert_mono_bitmap(&self, src: &Bitmap) -> Result<Bitmap> {
        Ok(self.engine().convert_mono_bitmap(src)?)
    }

    /// Log an engine error code under `prefix` and remember it
    pub fn set_engine_error(&self, prefix: &str, code: i32) {
        self.engine().set_error(prefix, code);
    }

    pub fn last_engine_error(&self) -> Option<Diagnostic> {
        self.engine().last_error()
    }

    pub fn set_main_face_family(&self, family: &str, style: FaceStyle) {
        self.resolver.set_main_face_family(family, style);
    }

    pub fn main_face(&self) -> MainFace {
        self.resolver.main_face()
    }

    /// Installed family names, sorted
    pub fn families(&self) -> Vec<String> {
        self.resolver.families()
    }
}

impl Default for TextContext {
    fn default() -> Self {
        Self::from_env()
    }
}
