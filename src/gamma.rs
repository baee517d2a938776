// Gamma-correct compositing of the RGBA canvas onto the paper colour.
// Replaces powf with table lookups so it is cheap enough to run every frame.

use crate::types::Rgba;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        // sRGB -> linear
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        // linear -> sRGB (quantized to 4096 steps)
        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Canvas pixel over opaque paper, packed as 0x00RRGGBB for minifb.
    /// Erased (transparent) pixels show the paper; partial alpha mixes in linear light.
    pub fn over_paper(&self, px: Rgba, paper: [u8; 3]) -> u32 {
        let [r, g, b, a] = px.0;
        let (r, g, b) = match a {
            255 => (r, g, b),
            0 => (paper[0], paper[1], paper[2]),
            _ => {
                let alpha = a as f32 / 255.0;
                let mix = |fg: u8, bg: u8| {
                    let l = alpha * self.srgb_u8_to_linear(fg) + (1.0 - alpha) * self.srgb_u8_to_linear(bg);
                    self.linear_to_srgb_u8(l)
                };
                (mix(r, paper[0]), mix(g, paper[1]), mix(b, paper[2]))
            }
        };
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
