// Falling cherry blossom petals drawn on a 2d canvas. With the `autostart`
// feature the module mounts itself on #blossomCanvas once the document is ready,
// otherwise the host calls mount()

mod utils;

pub mod animation;
pub mod blossom;
pub mod color;
pub mod options;
pub mod surface;
pub mod timer;

use wasm_bindgen::prelude::*;

pub use animation::{BlossomField, BlossomHandle, DEFAULT_CANVAS_ID, DEFAULT_COUNT};
pub use blossom::Blossom;
pub use color::Color;
pub use options::{BlossomOptions, Range};
pub use surface::{Bounds, Surface};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

#[wasm_bindgen]
pub fn mount(
    canvas_id: &str,
    count: u32,
    options: &BlossomOptions,
) -> Result<BlossomHandle, JsValue> {
    let window = window()?;
    let surface = Surface::from_element_id(&window, canvas_id)?;
    BlossomHandle::start(window, surface, count, options)
}

#[cfg(feature = "autostart")]
#[wasm_bindgen(start)]
pub fn autostart() -> Result<(), JsValue> {
    utils::set_panic_hook();
    let window = window()?;
    animation::on_document_ready(&window, || {
        match mount(DEFAULT_CANVAS_ID, DEFAULT_COUNT, &BlossomOptions::default()) {
            Ok(handle) => handle.run_forever(),
            Err(e) => wasm_bindgen::throw_val(e),
        }
    })
}
