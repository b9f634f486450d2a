// Per-blossom configuration. Rust callers override fields with struct update
// syntax over `BlossomOptions::default()`, JS callers go through the setters.

use crate::color::Color;
use rand::Rng;
use wasm_bindgen::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Result<Range, String> {
        if !min.is_finite() || !max.is_finite() {
            return Err(format!("range [{}, {}] must be finite", min, max));
        }
        if min > max {
            return Err(format!("range [{}, {}] has min greater than max", min, max));
        }
        Ok(Range { min, max })
    }

    // Degenerate ranges always yield exactly `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        random_between(rng, self.min, self.max)
    }

    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct BlossomOptions {
    pub(crate) color: String,
    pub(crate) radius: Range,
    pub(crate) speed: Range,
    pub(crate) wind: Range,
    pub(crate) blur: f64,
}

impl Default for BlossomOptions {
    fn default() -> Self {
        BlossomOptions {
            color: Color::BLOSSOM_PINK.to_css(),
            radius: Range { min: 3.0, max: 5.0 },
            speed: Range { min: 1.0, max: 2.0 },
            wind: Range { min: -1.5, max: 1.5 },
            blur: 2.0,
        }
    }
}

impl BlossomOptions {
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color.to_css();
        self
    }

    // Any css color goes straight to fillStyle/shadowColor; hex input is
    // checked and normalized, everything else is left to the canvas
    pub fn with_css_color(mut self, css: &str) -> Result<Self, String> {
        let css = css.trim();
        if css.is_empty() {
            return Err("color must not be empty".to_owned());
        }
        self.color = if css.starts_with('#') {
            Color::from_hex(css)?.to_css()
        } else {
            css.to_owned()
        };
        Ok(self)
    }

    pub fn with_radius(mut self, min: f64, max: f64) -> Result<Self, String> {
        let radius = Range::new(min, max)?;
        if radius.min < 0.0 {
            return Err(format!("radius must not be negative, got {}", radius.min));
        }
        self.radius = radius;
        Ok(self)
    }

    pub fn with_speed(mut self, min: f64, max: f64) -> Result<Self, String> {
        let speed = Range::new(min, max)?;
        if speed.min < 0.0 {
            return Err(format!("speed must not be negative, got {}", speed.min));
        }
        self.speed = speed;
        Ok(self)
    }

    pub fn with_wind(mut self, min: f64, max: f64) -> Result<Self, String> {
        self.wind = Range::new(min, max)?;
        Ok(self)
    }

    pub fn with_blur(mut self, blur: f64) -> Result<Self, String> {
        if !blur.is_finite() || blur < 0.0 {
            return Err(format!("blur must be a finite non-negative number, got {}", blur));
        }
        self.blur = blur;
        Ok(self)
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn radius(&self) -> Range {
        self.radius
    }

    pub fn speed(&self) -> Range {
        self.speed
    }

    pub fn wind(&self) -> Range {
        self.wind
    }

    pub fn blur(&self) -> f64 {
        self.blur
    }
}

// JS facing setters, each one validates and leaves the options untouched on error
#[wasm_bindgen]
impl BlossomOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BlossomOptions {
        BlossomOptions::default()
    }

    pub fn set_color(&mut self, css: &str) -> Result<(), JsValue> {
        self.apply(|o| o.with_css_color(css))
    }

    pub fn set_radius(&mut self, min: f64, max: f64) -> Result<(), JsValue> {
        self.apply(|o| o.with_radius(min, max))
    }

    pub fn set_speed(&mut self, min: f64, max: f64) -> Result<(), JsValue> {
        self.apply(|o| o.with_speed(min, max))
    }

    pub fn set_wind(&mut self, min: f64, max: f64) -> Result<(), JsValue> {
        self.apply(|o| o.with_wind(min, max))
    }

    pub fn set_blur(&mut self, blur: f64) -> Result<(), JsValue> {
        self.apply(|o| o.with_blur(blur))
    }
}

impl BlossomOptions {
    fn apply<F>(&mut self, f: F) -> Result<(), JsValue>
    where
        F: FnOnce(BlossomOptions) -> Result<BlossomOptions, String>,
    {
        *self = f(self.clone()).map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }
}
