//! Phong material coefficients.

use crate::Factor;

/// Surface response coefficients.
///
/// The default material is black for diffuse and specular, opaque and
/// non-reflective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse attenuation
    pub kd: Factor,
    /// Specular attenuation
    pub ks: Factor,
    /// Reflection coefficient
    pub kr: Factor,
    /// Transparency coefficient
    pub kt: Factor,
    /// Phong shininess exponent
    pub shininess: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kd: Factor::ZERO,
            ks: Factor::ZERO,
            kr: Factor::ZERO,
            kt: Factor::ZERO,
            shininess: 0,
        }
    }
}

impl Material {
    /// Create a default material.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same diffuse coefficient on all channels.
    pub fn with_kd(self, kd: f64) -> Self {
        self.with_kd_rgb(Factor::splat(kd))
    }

    pub fn with_kd_rgb(mut self, kd: Factor) -> Self {
        self.kd = kd;
        self
    }

    /// Set the same specular coefficient on all channels.
    pub fn with_ks(self, ks: f64) -> Self {
        self.with_ks_rgb(Factor::splat(ks))
    }

    pub fn with_ks_rgb(mut self, ks: Factor) -> Self {
        self.ks = ks;
        self
    }

    /// Set the same reflection coefficient on all channels.
    pub fn with_kr(self, kr: f64) -> Self {
        self.with_kr_rgb(Factor::splat(kr))
    }

    pub fn with_kr_rgb(mut self, kr: Factor) -> Self {
        self.kr = kr;
        self
    }

    /// Set the same transparency coefficient on all channels.
    pub fn with_kt(self, kt: f64) -> Self {
        self.with_kt_rgb(Factor::splat(kt))
    }

    pub fn with_kt_rgb(mut self, kt: Factor) -> Self {
        self.kt = kt;
        self
    }

    pub fn with_shininess(mut self, shininess: u32) -> Self {
        self.shininess = shininess;
        self
    }
}
