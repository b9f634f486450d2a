// Owns the blossoms and drives them: clear, update + draw every blossom,
// then ask the browser for the next frame. Window resizes only resize the
// canvas pixel buffer; blossoms pick up the new bounds on the next tick.

use crate::blossom::Blossom;
use crate::options::BlossomOptions;
use crate::surface::{Bounds, Surface};
use crate::timer::Timer;
use rand::Rng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Window};

pub const DEFAULT_CANVAS_ID: &str = "blossomCanvas";
pub const DEFAULT_COUNT: u32 = 150;

pub struct BlossomField {
    blossoms: Vec<Blossom>,
}

impl BlossomField {
    pub fn new<R: Rng + ?Sized>(
        count: usize,
        options: &BlossomOptions,
        rng: &mut R,
        bounds: Bounds,
    ) -> BlossomField {
        let mut blossoms = Vec::with_capacity(count);
        for _ in 0..count {
            blossoms.push(Blossom::new(options.clone(), rng, bounds));
        }
        BlossomField { blossoms }
    }

    pub fn len(&self) -> usize {
        self.blossoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blossoms.is_empty()
    }

    pub fn blossoms(&self) -> &[Blossom] {
        &self.blossoms
    }

    // Moves every blossom one frame, returns how many respawned
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) -> usize {
        let mut respawned = 0;
        for blossom in &mut self.blossoms {
            if blossom.update(rng, bounds) {
                respawned += 1;
            }
        }
        respawned
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, surface: &Surface) -> Result<(), JsValue> {
        surface.clear();
        let bounds = surface.bounds();
        for blossom in &mut self.blossoms {
            blossom.update(rng, bounds);
            blossom.draw(&surface.context)?;
        }
        Ok(())
    }
}

struct Driver {
    surface: Surface,
    field: BlossomField,
    frame_timing: bool,
}

impl Driver {
    fn tick(&mut self) -> Result<(), JsValue> {
        let _timer = Timer::start_if(self.frame_timing, "blossom frame");
        let mut rng = rand::thread_rng();
        self.field.tick(&mut rng, &self.surface)
    }
}

// State shared by the frame callback, the resize listener and the handle.
// Both closures hold an Rc back to it; stop() breaks the cycles by taking
// them out of their slots.
struct Shared {
    window: Window,
    driver: RefCell<Driver>,
    frame: RefCell<Option<Closure<dyn FnMut()>>>,
    frame_id: Cell<Option<i32>>,
    running: Cell<bool>,
    resize: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Shared {
    fn run_frame(&self) {
        if !self.running.get() {
            return;
        }
        let ticked = self.driver.borrow_mut().tick();
        if let Err(e) = ticked {
            self.halt("frame failed", &e);
            return;
        }
        if let Err(e) = self.schedule() {
            self.halt("requestAnimationFrame failed", &e);
        }
    }

    // At most one frame is ever pending
    fn schedule(&self) -> Result<(), JsValue> {
        self.cancel_pending();
        if let Some(callback) = self.frame.borrow().as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.frame_id.set(Some(id));
        }
        Ok(())
    }

    // Called from inside the frame callback, which can't drop itself; it stays
    // in its slot, unscheduled, until stop()
    fn halt(&self, what: &str, e: &JsValue) {
        console::error_2(&format!("blossom-canvas: {}, stopping", what).into(), e);
        self.running.set(false);
        self.detach_resize();
    }

    fn detach_resize(&self) {
        if let Some(resize) = self.resize.borrow_mut().take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            {
                console::warn_2(&"blossom-canvas: removing resize listener failed".into(), &e);
            }
        }
    }

    fn cancel_pending(&self) {
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                console::warn_2(&"blossom-canvas: cancelAnimationFrame failed".into(), &e);
            }
        }
    }

    fn stop(&self) {
        self.cancel_pending();
        self.frame.borrow_mut().take();
        self.detach_resize();
        self.running.set(false);
    }
}

// Dropping the handle (or free() from JS) stops the animation
#[wasm_bindgen]
pub struct BlossomHandle {
    shared: Rc<Shared>,
}

impl BlossomHandle {
    pub fn start(
        window: Window,
        surface: Surface,
        count: u32,
        options: &BlossomOptions,
    ) -> Result<BlossomHandle, JsValue> {
        let bounds = surface.fit_to_window(&window)?;
        let field = BlossomField::new(count as usize, options, &mut rand::thread_rng(), bounds);
        console::log_1(
            &format!(
                "blossom-canvas: {} blossoms on a {}x{} canvas",
                field.len(),
                bounds.width,
                bounds.height
            )
            .into(),
        );

        let shared = Rc::new(Shared {
            window,
            driver: RefCell::new(Driver {
                surface,
                field,
                frame_timing: false,
            }),
            frame: RefCell::new(None),
            frame_id: Cell::new(None),
            running: Cell::new(true),
            resize: RefCell::new(None),
        });
        let handle = BlossomHandle {
            shared: shared.clone(),
        };

        {
            let state = shared.clone();
            *shared.frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                state.run_frame();
            }) as Box<dyn FnMut()>));
        }
        {
            let state = shared.clone();
            *shared.resize.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                let window = &state.window;
                if let Err(e) = state.driver.borrow().surface.fit_to_window(window) {
                    console::warn_2(&"blossom-canvas: resize failed".into(), &e);
                }
            }) as Box<dyn FnMut()>));
        }
        let listening = shared.resize.borrow().as_ref().map(|listener| {
            shared
                .window
                .add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())
        });
        if let Some(result) = listening {
            result?;
        }

        shared.schedule()?;
        Ok(handle)
    }

    // Keeps the animation alive for the lifetime of the page
    pub fn run_forever(self) {
        std::mem::forget(self);
    }
}

#[wasm_bindgen]
impl BlossomHandle {
    pub fn stop(&mut self) {
        self.shared.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    pub fn is_listening_for_resize(&self) -> bool {
        self.shared.resize.borrow().is_some()
    }

    pub fn blossom_count(&self) -> u32 {
        self.shared.driver.borrow().field.len() as u32
    }

    pub fn set_frame_timing(&self, enabled: bool) {
        self.shared.driver.borrow_mut().frame_timing = enabled;
    }
}

impl Drop for BlossomHandle {
    fn drop(&mut self) {
        self.shared.stop();
    }
}

pub fn on_document_ready<F>(window: &Window, f: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn field_has_requested_population() {
        let mut rng = StdRng::seed_from_u64(10);
        let field = BlossomField::new(
            DEFAULT_COUNT as usize,
            &BlossomOptions::default(),
            &mut rng,
            Bounds::new(1024.0, 768.0),
        );
        assert_eq!(field.len(), 150);

        let empty = BlossomField::new(0, &BlossomOptions::default(), &mut rng, Bounds::new(1.0, 1.0));
        assert!(empty.is_empty());
    }

    #[test]
    fn update_keeps_order_and_respawns_below_bottom() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(300.0, 200.0);
        let mut field = BlossomField::new(50, &BlossomOptions::default(), &mut rng, bounds);
        let speeds: Vec<f64> = field.blossoms().iter().map(|b| b.speed).collect();

        // first update can't push anything past the bottom, every blossom starts above it
        assert_eq!(field.update(&mut rng, bounds), 0);
        let after: Vec<f64> = field.blossoms().iter().map(|b| b.speed).collect();
        assert_eq!(speeds, after);

        let mut respawned = 0;
        for _ in 0..1000 {
            respawned += field.update(&mut rng, bounds);
            for b in field.blossoms() {
                assert!(b.pos[1] <= bounds.height);
            }
        }
        assert!(respawned > 0);
    }

    #[test]
    fn shrinking_bounds_respawn_into_new_range() {
        let mut rng = StdRng::seed_from_u64(12);
        let large = Bounds::new(1920.0, 1080.0);
        let mut field = BlossomField::new(150, &BlossomOptions::default(), &mut rng, large);
        for b in field.blossoms.iter_mut() {
            b.pos[1] = 500.0;
        }

        let small = Bounds::new(400.0, 300.0);
        assert_eq!(field.update(&mut rng, small), 150);
        for b in field.blossoms() {
            assert!(b.pos[0] >= 0.0 && b.pos[0] < 400.0);
            assert!(b.pos[1] >= -300.0 && b.pos[1] < 0.0);
        }
    }
}
