// Wraps the canvas element and its 2d context. The canvas pixel buffer size
// (canvas.width/height) is the only size used for spawning, the bottom edge
// check and clearing; the css layout size is never read.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Bounds { width, height }
    }
}

pub struct Surface {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl Surface {
    pub fn from_element_id(window: &Window, id: &str) -> Result<Surface, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        Surface::new(canvas)
    }

    pub fn new(canvas: HtmlCanvasElement) -> Result<Surface, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Surface { canvas, context })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    // Resizing the pixel buffer also wipes it
    pub fn fit_to_window(&self, window: &Window) -> Result<Bounds, JsValue> {
        let (width, height) = window_inner_size(window)?;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(self.bounds())
    }

    pub fn clear(&self) {
        let Bounds { width, height } = self.bounds();
        self.context.clear_rect(0.0, 0.0, width, height);
    }
}

pub fn window_inner_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| JsValue::from_str("innerHeight is not a number"))?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}
