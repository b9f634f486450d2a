// A single falling petal: position, ellipse size, per-frame velocity and style.
// Respawns in place above the surface once it falls past the bottom edge.

use crate::options::{random_between, BlossomOptions};
use crate::surface::Bounds;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct Blossom {
    pub pos: Vector2<f64>,
    pub radius_x: f64,
    pub radius_y: f64,
    pub speed: f64,
    pub wind: f64,
    options: BlossomOptions,
}

impl Blossom {
    pub const ASPECT: f64 = 0.6;
    pub const ROTATION: f64 = PI / 4.0;

    pub fn new<R: Rng + ?Sized>(options: BlossomOptions, rng: &mut R, bounds: Bounds) -> Blossom {
        let mut blossom = Blossom {
            pos: [0.0, 0.0],
            radius_x: 0.0,
            radius_y: 0.0,
            speed: 0.0,
            wind: 0.0,
            options,
        };
        blossom.initialize(rng, bounds);
        blossom
    }

    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) {
        self.pos = [
            random_between(rng, 0.0, bounds.width),
            random_between(rng, -bounds.height, 0.0),
        ];
        self.radius_x = self.options.radius.sample(rng);
        self.radius_y = self.radius_x * Blossom::ASPECT;
        self.speed = self.options.speed.sample(rng);
        self.wind = self.options.wind.sample(rng);
    }

    // Returns true when the blossom fell off the bottom and was respawned
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: Bounds) -> bool {
        self.pos = vecmath::vec2_add(self.pos, self.velocity());

        if self.pos[1] > bounds.height {
            self.initialize(rng, bounds);
            true
        } else {
            false
        }
    }

    // Leaves fill and shadow state set on the shared context; every blossom
    // sets all of them before filling.
    pub fn draw(&self, ctx: &CanvasRenderingContext2d) -> Result<(), JsValue> {
        let css = self.options.color.as_str();
        ctx.begin_path();
        ctx.ellipse(
            self.pos[0],
            self.pos[1],
            self.radius_x,
            self.radius_y,
            Blossom::ROTATION,
            0.0,
            2.0 * PI,
        )?;
        #[allow(deprecated)]
        ctx.set_fill_style(&JsValue::from_str(css));
        ctx.set_shadow_blur(self.options.blur);
        ctx.set_shadow_color(css);
        ctx.fill();
        ctx.close_path();
        Ok(())
    }

    pub fn velocity(&self) -> Vector2<f64> {
        [self.wind, self.speed]
    }

    pub fn options(&self) -> &BlossomOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_options() -> BlossomOptions {
        BlossomOptions::default()
            .with_radius(3.0, 3.0)
            .and_then(|o| o.with_speed(2.0, 2.0))
            .and_then(|o| o.with_wind(0.0, 0.0))
            .unwrap()
    }

    #[test]
    fn spawns_above_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Bounds::new(800.0, 600.0);
        for _ in 0..500 {
            let b = Blossom::new(BlossomOptions::default(), &mut rng, bounds);
            assert!(b.pos[0] >= 0.0 && b.pos[0] < 800.0);
            assert!(b.pos[1] >= -600.0 && b.pos[1] < 0.0);
            assert_eq!(b.radius_y, b.radius_x * 0.6);
            assert!(b.options().radius().contains(b.radius_x));
            assert!(b.options().speed().contains(b.speed));
            assert!(b.options().wind().contains(b.wind));
        }
    }

    #[test]
    fn update_moves_by_speed_and_wind() {
        let mut rng = StdRng::seed_from_u64(2);
        let bounds = Bounds::new(100.0, 100.0);
        let mut b = Blossom::new(BlossomOptions::default(), &mut rng, bounds);
        b.pos = [50.0, 10.0];
        let (speed, wind) = (b.speed, b.wind);

        assert!(!b.update(&mut rng, bounds));
        assert_eq!(b.pos, [50.0 + wind, 10.0 + speed]);
        assert_eq!(b.speed, speed);
        assert_eq!(b.wind, wind);
    }

    #[test]
    fn respawns_in_the_same_update() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(320.0, 100.0);
        let mut b = Blossom::new(still_options(), &mut rng, bounds);
        b.pos = [10.0, 99.0];

        assert!(b.update(&mut rng, bounds));
        assert!(b.pos[1] >= -100.0 && b.pos[1] < 0.0, "y = {}", b.pos[1]);
        assert_eq!(b.radius_x, 3.0);
        assert_eq!(b.radius_y, 3.0 * 0.6);
        assert_eq!(b.speed, 2.0);
    }

    #[test]
    fn exactly_at_bottom_does_not_respawn() {
        let mut rng = StdRng::seed_from_u64(4);
        let bounds = Bounds::new(320.0, 100.0);
        let mut b = Blossom::new(still_options(), &mut rng, bounds);
        b.pos = [10.0, 98.0];

        assert!(!b.update(&mut rng, bounds));
        assert_eq!(b.pos[1], 100.0);
    }

    #[test]
    fn horizontal_drift_is_not_corrected() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = Bounds::new(50.0, 1000.0);
        let mut b = Blossom::new(
            BlossomOptions::default().with_wind(4.0, 4.0).unwrap(),
            &mut rng,
            bounds,
        );
        b.pos = [49.0, 0.0];
        b.update(&mut rng, bounds);
        assert_eq!(b.pos[0], 53.0);
    }

    #[test]
    fn invariants_hold_over_many_frames() {
        let mut rng = StdRng::seed_from_u64(6);
        let bounds = Bounds::new(640.0, 480.0);
        let mut b = Blossom::new(BlossomOptions::default(), &mut rng, bounds);
        let mut speed = b.speed;
        for _ in 0..10_000 {
            if b.update(&mut rng, bounds) {
                speed = b.speed;
            }
            assert_eq!(b.speed, speed);
            assert!(b.speed >= 0.0);
            assert_eq!(b.radius_y, b.radius_x * Blossom::ASPECT);
            assert!(b.pos[1] <= 480.0);
        }
    }
}
