//! Seeded lattice (Perlin-style) noise.
//!
//! The permutation table is a pure function of the seed, so every value this
//! module produces is reproducible across runs and processes.

use serde::Deserialize;

const LCG_MUL: f64 = 1_103_515_245.0;
const LCG_INC: f64 = 12_345.0;
const LCG_MOD: f64 = 2_147_483_648.0; // 2^31

/// Gradient directions selected by the low four bits of a lattice hash.
const GRADIENTS: [[f64; 3]; 16] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
    [1.0, 1.0, 0.0],
    [0.0, -1.0, 1.0],
    [-1.0, 1.0, 0.0],
    [0.0, -1.0, -1.0],
];

/// Linear-congruential sequence used only to shuffle the permutation table.
struct Lcg {
    state: f64,
}

impl Lcg {
    fn new(seed: f64) -> Self {
        Self {
            state: (LCG_MUL * seed + LCG_INC).rem_euclid(LCG_MOD),
        }
    }

    /// Next value normalized by `2^31 - 1`.
    fn next_unit(&mut self) -> f64 {
        self.state = (LCG_MUL * self.state + LCG_INC).rem_euclid(LCG_MOD);
        self.state / (LCG_MOD - 1.0)
    }
}

#[derive(Clone)]
pub struct NoiseField {
    seed: f64,
    perm: [u8; 512],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl NoiseField {
    pub fn new(seed: f64) -> Self {
        let seed = if seed.is_finite() {
            seed
        } else {
            log::warn!("non-finite noise seed {seed}; using 0.0");
            0.0
        };
        let mut base = [0u8; 256];
        for (i, v) in base.iter_mut().enumerate() {
            *v = i as u8;
        }
        let mut rng = Lcg::new(seed);
        for i in (1..base.len()).rev() {
            // The normalized draw can land on exactly 1.0 at the top of the range.
            let j = ((rng.next_unit() * (i + 1) as f64).floor() as usize).min(i);
            base.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = base[i & 255];
        }
        Self { seed, perm }
    }

    #[inline]
    pub fn seed(&self) -> f64 {
        self.seed
    }

    #[inline]
    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    #[inline]
    fn p(&self, i: usize) -> usize {
        self.perm[i] as usize
    }

    /// Coherent noise in `[-1, 1]`.
    pub fn noise3(&self, x: f64, y: f64, z: f64) -> f64 {
        let (xf, yf, zf) = (x.floor(), y.floor(), z.floor());
        let xi = lattice(xf);
        let yi = lattice(yf);
        let zi = lattice(zf);
        let (x, y, z) = (x - xf, y - yf, z - zf);
        let (u, v, w) = (fade(x), fade(y), fade(z));

        let a = self.p(xi) + yi;
        let aa = self.p(a) + zi;
        let ab = self.p(a + 1) + zi;
        let b = self.p(xi + 1) + yi;
        let ba = self.p(b) + zi;
        let bb = self.p(b + 1) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(self.p(aa), x, y, z), grad(self.p(ba), x - 1.0, y, z)),
                lerp(
                    u,
                    grad(self.p(ab), x, y - 1.0, z),
                    grad(self.p(bb), x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(self.p(aa + 1), x, y, z - 1.0),
                    grad(self.p(ba + 1), x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(self.p(ab + 1), x, y - 1.0, z - 1.0),
                    grad(self.p(bb + 1), x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }

    /// Sum of `octaves` layers of the `z = 0` slice, normalized to `[-1, 1]`.
    pub fn octave_noise(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        scale: f64,
    ) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = scale;
        let mut max_value = 0.0;
        for _ in 0..octaves {
            value += self.noise3(x * frequency, y * frequency, 0.0) * amplitude;
            max_value += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }
        if max_value > 0.0 { value / max_value } else { 0.0 }
    }
}

#[inline]
fn lattice(v: f64) -> usize {
    ((v as i64) & 255) as usize
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: usize, x: f64, y: f64, z: f64) -> f64 {
    let g = GRADIENTS[hash & 15];
    g[0] * x + g[1] * y + g[2] * z
}

/// One octave-noise pass scaled to world units.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct OctavePass {
    pub octaves: u32,
    pub persistence: f64,
    pub scale: f64,
    pub amplitude: f64,
}

impl OctavePass {
    #[inline]
    pub fn sample(&self, noise: &NoiseField, x: f64, z: f64) -> f64 {
        noise.octave_noise(x, z, self.octaves, self.persistence, self.scale) * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_a_duplicated_shuffle() {
        let n = NoiseField::new(0.5);
        let p = n.permutation();
        let mut seen = [false; 256];
        for &v in &p[..256] {
            assert!(!seen[v as usize], "value {v} repeated");
            seen[v as usize] = true;
        }
        assert_eq!(&p[..256], &p[256..]);
        // A shuffle, not the identity.
        assert!(p[..256].iter().enumerate().any(|(i, &v)| i != v as usize));
    }

    #[test]
    fn same_seed_same_table() {
        let a = NoiseField::new(0.123);
        let b = NoiseField::new(0.123);
        assert_eq!(a.permutation(), b.permutation());
        let c = NoiseField::new(0.124);
        assert_ne!(a.permutation(), c.permutation());
    }

    #[test]
    fn lattice_points_are_zero() {
        let n = NoiseField::new(7.0);
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, -2.0, 1000.0), (-17.0, 5.0, 2.0)] {
            assert_eq!(n.noise3(x, y, z), 0.0);
        }
    }

    #[test]
    fn negative_coordinates_wrap_lattice() {
        assert_eq!(lattice(-1.0), 255);
        assert_eq!(lattice(-256.0), 0);
        assert_eq!(lattice(257.0), 1);
    }

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_finite_seed_falls_back() {
        let a = NoiseField::new(f64::NAN);
        let b = NoiseField::new(0.0);
        assert_eq!(a.permutation(), b.permutation());
        assert_eq!(a.seed(), 0.0);
    }

    #[test]
    fn zero_octaves_is_flat() {
        let n = NoiseField::new(1.0);
        assert_eq!(n.octave_noise(12.5, 3.25, 0, 0.5, 0.01), 0.0);
    }
}
