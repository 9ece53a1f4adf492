use anyhow::{Context as _, anyhow};
use minado_core::Surface;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;

/// Paints onto the 2D context of a mounted `<canvas>`.
pub(crate) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn from_node(node: &NodeRef) -> anyhow::Result<Self> {
        let canvas = node
            .cast::<HtmlCanvasElement>()
            .context("canvas element is not mounted")?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|err| anyhow!("failed to get 2d context: {:?}", err))?
            .context("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("context is not a CanvasRenderingContext2d"))?;
        Ok(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        if let Err(err) = self.ctx.fill_text(text, x, y) {
            log::error!("failed to draw {:?}: {:?}", text, err);
        }
    }
}
