//! Recursive ray tracing.
//!
//! Implements Whitted-style color resolution:
//! - Phong local shading with transparency-attenuated shadow rays
//! - Recursive reflection and refraction, bounded by depth and by the
//!   accumulated attenuation

use crate::geometry::GeoPoint;
use crate::{color, lower_than, Color, Factor, LightSource, Material, Scene, BLACK};
use prism_math::{align_zero, is_zero, Ray, Vector};

/// Maximum recursion depth for reflected and refracted rays.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Recursion stops once the accumulated attenuation drops below this.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

const INITIAL_K: Factor = Factor::ONE;

/// Resolves the color seen along a ray.
pub trait RayTracer: Send + Sync {
    /// Color seen along a single ray.
    fn trace_ray(&self, ray: &Ray) -> Color;

    /// Average color over a batch of rays.
    fn trace_rays(&self, rays: &[Ray]) -> Color {
        if rays.is_empty() {
            return BLACK;
        }
        let sum = rays.iter().map(|ray| self.trace_ray(ray)).sum();
        color::reduce(sum, rays.len())
    }
}

/// Ray tracer over a read-only [`Scene`].
#[derive(Debug, Clone, Copy)]
pub struct BasicRayTracer<'s> {
    scene: &'s Scene,
}

impl<'s> BasicRayTracer<'s> {
    pub fn new(scene: &'s Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &'s Scene {
        self.scene
    }

    fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'s>> {
        ray.find_closest(self.scene.geometries().intersect(ray))
    }

    /// Local and global contributions at a hit, recursing until `level`
    /// reaches 1.
    fn calc_color(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Factor) -> Color {
        let color = self.calc_local_effects(gp, ray, k);
        if level == 1 {
            color
        } else {
            color + self.calc_global_effects(gp, ray, level, k)
        }
    }

    /// Emission plus diffuse and specular terms from every light that is on
    /// the viewer's side of the surface.
    fn calc_local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: Factor) -> Color {
        let mut color = gp.geometry.emission();
        let Ok(n) = gp.normal() else {
            return color;
        };
        let v = ray.direction();
        let nv = align_zero(n.dot(&v));
        if nv == 0.0 {
            return color;
        }

        let material = gp.geometry.material();
        for light in self.scene.lights() {
            let Some(l) = light.direction_to(gp.point) else {
                continue;
            };
            let nl = align_zero(n.dot(&l));
            // sign(nl) == sign(nv)
            if nl * nv > 0.0 {
                let ktr = self.transparency(gp, light.as_ref(), &l, &n);
                if !lower_than(ktr * k, MIN_CALC_COLOR_K) {
                    let il = light.intensity_at(gp.point) * ktr;
                    color += il
                        * (calc_diffusive(material, nl)
                            + calc_specular(material, &n, &l, nl, &v));
                }
            }
        }
        color
    }

    /// Fraction of the light that reaches `gp` through the geometry in
    /// between: the product of the transparency of every blocker closer
    /// than the light.
    fn transparency(&self, gp: &GeoPoint<'_>, light: &dyn LightSource, l: &Vector, n: &Vector) -> Factor {
        let shadow_ray = Ray::with_offset(gp.point, -*l, *n);
        let light_distance = light.distance_to(gp.point);

        let mut ktr = Factor::ONE;
        for hit in self.scene.geometries().intersect(&shadow_ray) {
            if hit.point.distance(&gp.point) < light_distance {
                ktr *= hit.geometry.material().kt;
                if lower_than(ktr, MIN_CALC_COLOR_K) {
                    return Factor::ZERO;
                }
            }
        }
        ktr
    }

    /// Reflected and refracted contributions.
    fn calc_global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Factor) -> Color {
        let Ok(n) = gp.normal() else {
            return BLACK;
        };
        let v = ray.direction();
        let vn = align_zero(v.dot(&n));
        // Grazing hit: no well-defined secondary rays
        if vn == 0.0 {
            return BLACK;
        }

        let material = gp.geometry.material();
        let mut color = BLACK;

        let reflected_dir = v.as_dvec3() - n.as_dvec3() * (2.0 * vn);
        if let Ok(r) = Vector::from_dvec3(reflected_dir) {
            let reflected = Ray::with_offset(gp.point, r, n);
            color += self.calc_global_effect(&reflected, level, material.kr, k * material.kr);
        }

        let refracted = Ray::with_offset(gp.point, v, n);
        color += self.calc_global_effect(&refracted, level, material.kt, k * material.kt);

        color
    }

    /// Color carried back along one secondary ray, weighted by `kx`.
    fn calc_global_effect(&self, ray: &Ray, level: u32, kx: Factor, kkx: Factor) -> Color {
        if lower_than(kkx, MIN_CALC_COLOR_K) {
            return BLACK;
        }
        match self.find_closest_intersection(ray) {
            Some(gp) => self.calc_secondary_color(&gp, ray, level, kx, kkx),
            None => self.scene.background() * kx,
        }
    }

    /// Color at the hit of a secondary ray. A ray grazing the surface
    /// contributes nothing.
    fn calc_secondary_color(
        &self,
        gp: &GeoPoint<'_>,
        ray: &Ray,
        level: u32,
        kx: Factor,
        kkx: Factor,
    ) -> Color {
        match gp.normal() {
            Ok(n) if !is_zero(n.dot(&ray.direction())) => {
                self.calc_color(gp, ray, level - 1, kkx) * kx
            }
            _ => BLACK,
        }
    }
}

impl RayTracer for BasicRayTracer<'_> {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.find_closest_intersection(ray) {
            Some(gp) => {
                self.scene.ambient_light().intensity()
                    + self.calc_color(&gp, ray, MAX_CALC_COLOR_LEVEL, INITIAL_K)
            }
            None => self.scene.background(),
        }
    }
}

/// kD * |n·l|
fn calc_diffusive(material: &Material, nl: f64) -> Factor {
    material.kd * nl.abs()
}

/// kS * max(0, -v·r)^shininess, with r the light direction mirrored about n.
fn calc_specular(material: &Material, n: &Vector, l: &Vector, nl: f64, v: &Vector) -> Factor {
    let r = l.as_dvec3() - n.as_dvec3() * (2.0 * nl);
    let vr = (-v.as_dvec3()).dot(r).max(0.0);
    material.ks * vr.powi(i32::try_from(material.shininess).unwrap_or(i32::MAX))
}
