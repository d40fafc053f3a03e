//! Light sources.

use crate::{Color, Factor, BLACK};
use prism_math::{Point, Vector};

/// Scene-wide constant light with no position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// No ambient light.
    pub const NONE: AmbientLight = AmbientLight { intensity: BLACK };

    /// Ambient light `I_A` attenuated per channel by `k_A`.
    pub fn new(ia: Color, ka: Factor) -> Self {
        Self { intensity: ia * ka }
    }

    /// Ambient light `I_A` attenuated uniformly by `k_A`.
    pub fn uniform(ia: Color, ka: f64) -> Self {
        Self { intensity: ia * ka }
    }

    #[inline]
    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::NONE
    }
}

/// A light that illuminates individual surface points.
pub trait LightSource: Send + Sync + std::fmt::Debug {
    /// Intensity arriving at `point`.
    fn intensity_at(&self, point: Point) -> Color;

    /// Unit direction from the light toward `point`, `None` when undefined
    /// (the point sits on the light itself).
    fn direction_to(&self, point: Point) -> Option<Vector>;

    /// Distance from `point` to the light.
    fn distance_to(&self, point: Point) -> f64;
}

/// A light infinitely far away shining in a fixed direction.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector) -> Self {
        Self {
            intensity,
            direction: direction.normalize(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity_at(&self, _point: Point) -> Color {
        self.intensity
    }

    fn direction_to(&self, _point: Point) -> Option<Vector> {
        Some(self.direction)
    }

    fn distance_to(&self, _point: Point) -> f64 {
        f64::INFINITY
    }
}

/// An omnidirectional light at a position, fading with distance.
///
/// Intensity at distance `d` is `I0 / (kC + kL*d + kQ*d^2)`.
#[derive(Debug, Clone)]
pub struct PointLight {
    intensity: Color,
    position: Point,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance attenuation.
    pub fn new(intensity: Color, position: Point) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.kc = kc;
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.kl = kl;
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.kq = kq;
        self
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity_at(&self, point: Point) -> Color {
        let d_squared = point.distance_squared(&self.position);
        let d = d_squared.sqrt();
        self.intensity / (self.kc + self.kl * d + self.kq * d_squared)
    }

    fn direction_to(&self, point: Point) -> Option<Vector> {
        point.subtract(&self.position).ok().map(|l| l.normalize())
    }

    fn distance_to(&self, point: Point) -> f64 {
        point.distance(&self.position)
    }
}

/// A point light restricted to a cone around its direction.
///
/// The point-light intensity is scaled by `max(0, dir·L)^narrow_beam`.
#[derive(Debug, Clone)]
pub struct SpotLight {
    light: PointLight,
    direction: Vector,
    narrow_beam: u32,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point, direction: Vector) -> Self {
        Self {
            light: PointLight::new(intensity, position),
            direction: direction.normalize(),
            narrow_beam: 1,
        }
    }

    pub fn with_kc(mut self, kc: f64) -> Self {
        self.light = self.light.with_kc(kc);
        self
    }

    pub fn with_kl(mut self, kl: f64) -> Self {
        self.light = self.light.with_kl(kl);
        self
    }

    pub fn with_kq(mut self, kq: f64) -> Self {
        self.light = self.light.with_kq(kq);
        self
    }

    /// Tighten the beam; 1 is the plain cosine falloff.
    pub fn with_narrow_beam(mut self, narrow_beam: u32) -> Self {
        self.narrow_beam = narrow_beam.max(1);
        self
    }
}

impl LightSource for SpotLight {
    fn intensity_at(&self, point: Point) -> Color {
        let Some(l) = self.light.direction_to(point) else {
            return BLACK;
        };
        let cone = self.direction.dot(&l);
        if cone <= 0.0 {
            return BLACK;
        }
        let exponent = i32::try_from(self.narrow_beam).unwrap_or(i32::MAX);
        self.light.intensity_at(point) * cone.powi(exponent)
    }

    fn direction_to(&self, point: Point) -> Option<Vector> {
        self.light.direction_to(point)
    }

    fn distance_to(&self, point: Point) -> f64 {
        self.light.distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambient_light() {
        let a = AmbientLight::uniform(Color::new(255.0, 255.0, 255.0), 0.1);
        assert!((a.intensity() - Color::splat(25.5)).length() < 1e-9);

        let a = AmbientLight::new(Color::splat(100.0), Factor::new(0.5, 0.0, 1.0));
        assert_eq!(a.intensity(), Color::new(50.0, 0.0, 100.0));

        assert_eq!(AmbientLight::default().intensity(), BLACK);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::splat(10.0), Vector::new(0.0, 0.0, -4.0).unwrap());
        let p = Point::new(3.0, 4.0, 5.0);
        assert_eq!(light.intensity_at(p), Color::splat(10.0));
        assert_eq!(light.direction_to(p), Some(Vector::NEG_Z));
        assert_eq!(light.distance_to(p), f64::INFINITY);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(100.0), Point::ZERO)
            .with_kl(1.0)
            .with_kq(1.0);
        let p = Point::new(0.0, 0.0, 2.0);

        // 100 / (1 + 2 + 4)
        assert!((light.intensity_at(p) - Color::splat(100.0 / 7.0)).length() < 1e-9);
        assert_eq!(light.direction_to(p), Some(Vector::Z));
        assert_eq!(light.distance_to(p), 2.0);
    }

    #[test]
    fn test_point_light_direction_undefined_at_position() {
        let light = PointLight::new(Color::splat(100.0), Point::new(1.0, 1.0, 1.0));
        assert_eq!(light.direction_to(Point::new(1.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_spot_light_cone() {
        let light = SpotLight::new(Color::splat(100.0), Point::ZERO, Vector::NEG_Z);

        // Straight ahead gets the full point-light intensity
        assert_eq!(light.intensity_at(Point::new(0.0, 0.0, -3.0)), Color::splat(100.0));

        // Behind the light gets nothing
        assert_eq!(light.intensity_at(Point::new(0.0, 0.0, 3.0)), BLACK);
        // Perpendicular to the beam gets nothing
        assert_eq!(light.intensity_at(Point::new(3.0, 0.0, 0.0)), BLACK);

        // At 60 degrees the cosine halves the intensity
        let p = Point::new(3f64.sqrt(), 0.0, -1.0);
        assert!((light.intensity_at(p) - Color::splat(50.0)).length() < 1e-9);
    }

    #[test]
    fn test_spot_light_narrow_beam() {
        let light = SpotLight::new(Color::splat(100.0), Point::ZERO, Vector::NEG_Z).with_narrow_beam(2);
        let p = Point::new(3f64.sqrt(), 0.0, -1.0);
        assert!((light.intensity_at(p) - Color::splat(25.0)).length() < 1e-9);
    }

    #[test]
    fn test_spot_light_huge_narrow_beam() {
        let light =
            SpotLight::new(Color::splat(100.0), Point::ZERO, Vector::NEG_Z).with_narrow_beam(u32::MAX);
        assert_eq!(light.intensity_at(Point::new(0.0, 0.0, -1.0)), Color::splat(100.0));
        assert_eq!(light.intensity_at(Point::new(3f64.sqrt(), 0.0, -1.0)), BLACK);
    }
}
