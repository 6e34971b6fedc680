use std::error::Error;
use std::f32::consts::PI;
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::Deserialize;
use vista_geom::{Aabb, Vec3};

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PlayerConfig {
    #[serde(default)]
    pub movement: Movement,
    #[serde(default)]
    pub jump: Jump,
    #[serde(default)]
    pub physics: Physics,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Movement {
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    #[serde(default = "default_run_speed")]
    pub run_speed: f32,
    /// Highest rise (above the feet) walked onto without stepping.
    #[serde(default = "default_step_tolerance")]
    pub step_tolerance: f32,
    /// Highest rise climbed with an automatic step-jump.
    #[serde(default = "default_max_step_height")]
    pub max_step_height: f32,
    /// Half-width of the random spawn square around the origin.
    #[serde(default = "default_spawn_extent")]
    pub spawn_extent: f32,
    #[serde(default = "default_spawn_height")]
    pub spawn_height: f32,
}

fn default_walk_speed() -> f32 {
    50.0
}
fn default_run_speed() -> f32 {
    100.0
}
fn default_step_tolerance() -> f32 {
    0.5
}
fn default_max_step_height() -> f32 {
    8.0
}
fn default_spawn_extent() -> f32 {
    50.0
}
fn default_spawn_height() -> f32 {
    5.0
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            walk_speed: default_walk_speed(),
            run_speed: default_run_speed(),
            step_tolerance: default_step_tolerance(),
            max_step_height: default_max_step_height(),
            spawn_extent: default_spawn_extent(),
            spawn_height: default_spawn_height(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Jump {
    #[serde(default = "default_base_jump_power")]
    pub base_power: f32,
    #[serde(default = "default_jump_multiplier")]
    pub multiplier: f32,
    #[serde(default = "default_max_jump_power")]
    pub max_power: f32,
    /// Absolute altitude at or above which manual jumps are refused.
    #[serde(default = "default_max_jump_height")]
    pub max_height: f32,
    #[serde(default = "default_jump_cooldown")]
    pub cooldown: f32,
    #[serde(default = "default_auto_jump_cooldown")]
    pub auto_cooldown: f32,
}

fn default_base_jump_power() -> f32 {
    12.0
}
fn default_jump_multiplier() -> f32 {
    1.5
}
fn default_max_jump_power() -> f32 {
    200.0
}
fn default_max_jump_height() -> f32 {
    120.0
}
fn default_jump_cooldown() -> f32 {
    0.1
}
fn default_auto_jump_cooldown() -> f32 {
    0.2
}

impl Default for Jump {
    fn default() -> Self {
        Self {
            base_power: default_base_jump_power(),
            multiplier: default_jump_multiplier(),
            max_power: default_max_jump_power(),
            max_height: default_max_jump_height(),
            cooldown: default_jump_cooldown(),
            auto_cooldown: default_auto_jump_cooldown(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Physics {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    /// Height of the body center above the terrain when standing.
    #[serde(default = "default_clearance")]
    pub clearance: f32,
    #[serde(default = "default_ground_margin")]
    pub ground_margin: f32,
    #[serde(default = "default_body_size")]
    pub body_size: [f32; 3],
}

fn default_gravity() -> f32 {
    -25.0
}
fn default_clearance() -> f32 {
    1.0
}
fn default_ground_margin() -> f32 {
    0.1
}
fn default_body_size() -> [f32; 3] {
    [0.8, 2.0, 0.8]
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            clearance: default_clearance(),
            ground_margin: default_ground_margin(),
            body_size: default_body_size(),
        }
    }
}

/// Flattened walker tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerParams {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub step_tolerance: f32,
    pub max_step_height: f32,
    pub spawn_extent: f32,
    pub spawn_height: f32,
    pub base_jump_power: f32,
    pub jump_multiplier: f32,
    pub max_jump_power: f32,
    pub max_jump_height: f32,
    pub jump_cooldown: f32,
    pub auto_jump_cooldown: f32,
    pub gravity: f32,
    pub clearance: f32,
    pub ground_margin: f32,
    pub body_size: Vec3,
}

impl Default for PlayerParams {
    fn default() -> Self {
        Self::from_config(&PlayerConfig::default())
    }
}

impl PlayerParams {
    pub fn from_config(cfg: &PlayerConfig) -> Self {
        let m = &cfg.movement;
        let j = &cfg.jump;
        let p = &cfg.physics;
        let base = j.base_power.max(0.0);
        Self {
            walk_speed: m.walk_speed,
            run_speed: m.run_speed,
            step_tolerance: m.step_tolerance,
            max_step_height: m.max_step_height.max(m.step_tolerance),
            spawn_extent: m.spawn_extent.abs(),
            spawn_height: m.spawn_height,
            base_jump_power: base,
            jump_multiplier: j.multiplier.max(1.0),
            max_jump_power: j.max_power.max(base),
            max_jump_height: j.max_height,
            jump_cooldown: j.cooldown.max(0.0),
            auto_jump_cooldown: j.auto_cooldown.max(0.0),
            gravity: p.gravity,
            clearance: p.clearance,
            ground_margin: p.ground_margin.max(0.0),
            body_size: Vec3::new(p.body_size[0], p.body_size[1], p.body_size[2]),
        }
    }
}

pub fn load_params_from_path(path: &Path) -> Result<PlayerParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: PlayerConfig = toml::from_str(&s)?;
    Ok(PlayerParams::from_config(&cfg))
}

/// Terrain-following avatar. Collides only with the height field, sampled
/// through a `ground(x, z)` closure.
#[derive(Debug, Clone)]
pub struct Walker {
    pub pos: Vec3, // body center; rests `clearance` above the terrain
    pub vel: Vec3,
    pub on_ground: bool,
    pub can_jump: bool,
    pub jump_power: f32,
    pub moving: bool,
    pub running: bool,
    pub yaw: f32, // radians
    pub bbox: Aabb,
    jump_cooldown: f32,
    params: PlayerParams,
}

impl Walker {
    pub fn new(pos: Vec3, params: PlayerParams) -> Self {
        let mut w = Self {
            pos,
            vel: Vec3::ZERO,
            on_ground: false,
            can_jump: true,
            jump_power: params.base_jump_power,
            moving: false,
            running: false,
            yaw: PI,
            bbox: Aabb::default(),
            jump_cooldown: 0.0,
            params,
        };
        w.refresh_bbox();
        w
    }

    #[inline]
    pub fn params(&self) -> &PlayerParams {
        &self.params
    }

    /// Seconds until jumping is allowed again.
    #[inline]
    pub fn jump_cooldown(&self) -> f32 {
        self.jump_cooldown
    }

    /// Drops the walker `spawn_height` above a random point of the spawn square.
    pub fn spawn<R, F>(&mut self, rng: &mut R, ground: &mut F)
    where
        R: Rng,
        F: FnMut(f32, f32) -> f32,
    {
        let e = self.params.spawn_extent;
        let (x, z) = if e > 0.0 {
            (rng.random_range(-e..e), rng.random_range(-e..e))
        } else {
            (0.0, 0.0)
        };
        self.place(x, z, ground);
    }

    /// Resets kinematic state at `(x, z)`, `spawn_height` above the terrain.
    pub fn place<F>(&mut self, x: f32, z: f32, ground: &mut F)
    where
        F: FnMut(f32, f32) -> f32,
    {
        let h = ground(x, z);
        self.pos = Vec3::new(x, h + self.params.spawn_height, z);
        self.vel = Vec3::ZERO;
        self.on_ground = false;
        self.can_jump = true;
        self.jump_cooldown = 0.0;
        self.jump_power = self.params.base_jump_power;
        self.moving = false;
        self.running = false;
        self.settle(ground);
        self.refresh_bbox();
        log::info!("walker spawned at ({:.1}, {:.1}, {:.1})", x, self.pos.y, z);
    }

    /// Horizontal step along the planar part of `direction`, bracketed by
    /// ground tests. Blocked steps try an automatic step-jump, then sliding
    /// along X alone, then Z alone.
    pub fn move_with_sampler<F>(&mut self, direction: Vec3, dt: f32, running: bool, ground: &mut F)
    where
        F: FnMut(f32, f32) -> f32,
    {
        if !self.on_ground {
            // A walker resting on the floor counts as grounded before it steps.
            self.settle(ground);
        }
        let dir = direction.planar();
        self.moving = dir.planar_length() > 0.0;
        self.running = running && self.moving;
        if self.moving {
            self.yaw = dir.x.atan2(dir.z) + PI;
            let speed = if self.running {
                self.params.run_speed
            } else {
                self.params.walk_speed
            };
            let mv = dir * (speed * dt);
            let (x0, z0) = (self.pos.x, self.pos.z);
            let stepped = self.try_step(x0 + mv.x, z0 + mv.z, ground)
                || (mv.x != 0.0 && self.try_step(x0 + mv.x, z0, ground))
                || (mv.z != 0.0 && self.try_step(x0, z0 + mv.z, ground));
            if !stepped {
                log::trace!("walker blocked at ({:.2}, {:.2})", x0, z0);
            }
        }
        self.settle(ground);
        self.refresh_bbox();
    }

    fn try_step<F>(&mut self, nx: f32, nz: f32, ground: &mut F) -> bool
    where
        F: FnMut(f32, f32) -> f32,
    {
        let h = ground(nx, nz);
        let rise = h - (self.pos.y - self.params.clearance);
        if rise <= self.params.step_tolerance {
            self.pos.x = nx;
            self.pos.z = nz;
            self.pos.y = self.pos.y.max(h + self.params.clearance);
            true
        } else if rise <= self.params.max_step_height && self.on_ground && self.can_jump {
            self.auto_jump(rise);
            self.pos.x = nx;
            self.pos.z = nz;
            true
        } else {
            false
        }
    }

    fn auto_jump(&mut self, rise: f32) {
        let power = self.params.base_jump_power.max(rise * 2.0 + 5.0);
        self.vel.y = self.vel.y.max(0.0) + power;
        self.on_ground = false;
        self.can_jump = false;
        self.jump_cooldown = self.params.auto_jump_cooldown;
        log::trace!("auto-step over {:.2} with impulse {:.1}", rise, power);
    }

    /// Manual jump; returns whether it fired. Each jump escalates the next one's
    /// power until the walker lands.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump || self.pos.y >= self.params.max_jump_height {
            return false;
        }
        self.vel.y = self.vel.y.max(0.0) + self.jump_power;
        self.jump_power =
            (self.jump_power * self.params.jump_multiplier).min(self.params.max_jump_power);
        self.on_ground = false;
        self.can_jump = false;
        self.jump_cooldown = self.params.jump_cooldown;
        true
    }

    /// Per-frame tick: cooldown, gravity, altitude cap, ground test.
    pub fn update<F>(&mut self, dt: f32, ground: &mut F)
    where
        F: FnMut(f32, f32) -> f32,
    {
        if self.jump_cooldown > 0.0 {
            self.jump_cooldown -= dt;
            if self.jump_cooldown <= 0.0 {
                self.jump_cooldown = 0.0;
                self.can_jump = true;
            }
        }
        if !self.on_ground {
            self.vel.y += self.params.gravity * dt;
            self.pos.y += self.vel.y * dt;
            if self.pos.y > self.params.max_jump_height {
                self.pos.y = self.params.max_jump_height;
                self.vel.y = self.vel.y.min(0.0);
            }
        }
        self.settle(ground);
        self.refresh_bbox();
    }

    /// Keeps the walker at or above `terrain + clearance` and decides whether it
    /// stands on the ground. Landing resets the jump power.
    fn settle<F>(&mut self, ground: &mut F)
    where
        F: FnMut(f32, f32) -> f32,
    {
        let floor = ground(self.pos.x, self.pos.z) + self.params.clearance;
        let was_grounded = self.on_ground;
        if self.pos.y < floor {
            self.pos.y = floor;
            self.vel.y = self.vel.y.max(0.0);
        }
        self.on_ground = self.pos.y <= floor + self.params.ground_margin && self.vel.y <= 0.0;
        if self.on_ground {
            self.pos.y = floor;
            self.vel.y = 0.0;
            if !was_grounded {
                self.jump_power = self.params.base_jump_power;
            }
        }
    }

    fn refresh_bbox(&mut self) {
        self.bbox = Aabb::from_center_size(self.pos, self.params.body_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(h: f32) -> impl FnMut(f32, f32) -> f32 {
        move |_, _| h
    }

    fn grounded_at(x: f32, z: f32, ground: &mut impl FnMut(f32, f32) -> f32) -> Walker {
        let mut w = Walker::new(Vec3::ZERO, PlayerParams::default());
        w.place(x, z, ground);
        for _ in 0..200 {
            w.update(1.0 / 60.0, ground);
        }
        assert!(w.on_ground);
        w
    }

    #[test]
    fn walking_one_second_on_flat_ground() {
        let mut g = flat(0.0);
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 1.0, false, &mut g);
        assert!((w.pos.z - 50.0).abs() < 1e-4);
        assert!(w.moving && !w.running);
        assert!((w.yaw - PI).abs() < 1e-6);
        assert_eq!(w.pos.y, 1.0);
    }

    #[test]
    fn walking_one_second_on_generated_terrain() {
        use std::sync::Arc;
        use vista_world::{HeightField, WorldGenParams};

        for seed in [0.5, 0.9, 0.33] {
            let mut hf = HeightField::new(seed, Arc::new(WorldGenParams::default()));
            let mut g = |x: f32, z: f32| hf.elevation(f64::from(x), f64::from(z)) as f32;
            let h0 = g(0.0, 0.0);
            let mut w = Walker::new(Vec3::new(0.0, h0 + 1.0, 0.0), PlayerParams::default());
            w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 1.0, false, &mut g);
            assert!((w.pos.z - 50.0).abs() < 1e-3, "seed {seed}: z={}", w.pos.z);
            assert!(w.pos.y >= g(w.pos.x, w.pos.z) + 1.0 - 1e-3);
        }
    }

    #[test]
    fn resting_walker_counts_as_grounded_before_first_step() {
        let mut g = |_: f32, z: f32| if z > 0.5 { 4.0 } else { 0.0 };
        let mut w = Walker::new(Vec3::new(0.0, 1.0, 0.0), PlayerParams::default());
        assert!(!w.on_ground);
        w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 0.02, false, &mut g);
        assert!((w.pos.z - 1.0).abs() < 1e-5);
        assert_eq!(w.vel.y, 13.0);
    }

    #[test]
    fn place_on_floor_is_grounded() {
        let mut g = flat(2.0);
        let params = PlayerParams {
            spawn_height: 1.0,
            ..PlayerParams::default()
        };
        let mut w = Walker::new(Vec3::ZERO, params);
        w.place(0.0, 0.0, &mut g);
        assert!(w.on_ground);
        assert_eq!(w.pos.y, 3.0);
    }

    #[test]
    fn running_uses_run_speed_only_when_moving() {
        let mut g = flat(3.0);
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.move_with_sampler(Vec3::new(1.0, 0.0, 0.0), 0.5, true, &mut g);
        assert!((w.pos.x - 50.0).abs() < 1e-4);
        assert!(w.running);
        w.move_with_sampler(Vec3::ZERO, 0.5, true, &mut g);
        assert!(!w.moving && !w.running);
        assert!((w.pos.x - 50.0).abs() < 1e-4);
    }

    #[test]
    fn three_jumps_escalate_power() {
        let mut g = flat(0.0);
        let mut w = grounded_at(0.0, 0.0, &mut g);
        let mut seen = vec![w.jump_power];
        for _ in 0..3 {
            assert!(w.jump());
            seen.push(w.jump_power);
            assert!(!w.can_jump);
            // Two short frames run the cooldown out while still airborne.
            w.update(0.06, &mut g);
            w.update(0.06, &mut g);
            assert!(w.can_jump && !w.on_ground);
        }
        assert_eq!(seen, vec![12.0, 18.0, 27.0, 40.5]);
    }

    #[test]
    fn landing_resets_jump_power() {
        let mut g = flat(0.0);
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.jump();
        w.update(0.1, &mut g);
        w.jump();
        assert_eq!(w.jump_power, 27.0);
        let mut frames = 0;
        while !w.on_ground && frames < 10_000 {
            w.update(1.0 / 60.0, &mut g);
            assert!(w.pos.y <= w.params().max_jump_height + 1e-4);
            frames += 1;
        }
        assert!(w.on_ground);
        assert_eq!(w.jump_power, 12.0);
    }

    #[test]
    fn jump_power_caps_at_max() {
        let mut w = Walker::new(Vec3::new(0.0, 5.0, 0.0), PlayerParams::default());
        for _ in 0..20 {
            w.can_jump = true;
            w.pos.y = 5.0;
            assert!(w.jump());
            assert!(w.jump_power <= 200.0);
        }
        assert_eq!(w.jump_power, 200.0);
    }

    #[test]
    fn no_jump_at_max_altitude() {
        let mut w = Walker::new(Vec3::new(0.0, 120.0, 0.0), PlayerParams::default());
        assert!(!w.jump());
        assert_eq!(w.vel.y, 0.0);
    }

    #[test]
    fn altitude_is_capped() {
        let mut g = flat(0.0);
        let mut w = Walker::new(Vec3::new(0.0, 110.0, 0.0), PlayerParams::default());
        w.vel.y = 500.0;
        w.update(0.1, &mut g);
        assert_eq!(w.pos.y, 120.0);
        assert_eq!(w.vel.y, 0.0);
    }

    #[test]
    fn small_rise_is_walked_onto() {
        // 0.3 units higher past z = 0.5
        let mut g = |_: f32, z: f32| if z > 0.5 { 0.3 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 0.02, false, &mut g);
        assert!((w.pos.z - 1.0).abs() < 1e-5);
        assert!((w.pos.y - 1.3).abs() < 1e-5);
        assert!(w.on_ground);
    }

    #[test]
    fn ledge_triggers_auto_step() {
        let mut g = |_: f32, z: f32| if z > 0.5 { 4.0 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 0.02, false, &mut g);
        assert!((w.pos.z - 1.0).abs() < 1e-5);
        // rise 4 above the feet: impulse 4*2+5 = 13
        assert_eq!(w.vel.y, 13.0);
        assert!(!w.on_ground && !w.can_jump);
        assert!((w.jump_cooldown() - 0.2).abs() < 1e-6);
        assert!(w.pos.y >= 5.0);
        assert_eq!(w.jump_power, 12.0);
    }

    #[test]
    fn wall_blocks_then_slides_along_x() {
        // A cliff 20 high across +z; x is open.
        let mut g = |_: f32, z: f32| if z > 0.5 { 20.0 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        let d = Vec3::new(1.0, 0.0, 1.0).normalized();
        w.move_with_sampler(d, 0.02, false, &mut g);
        let step = 50.0 * 0.02 * d.x;
        assert!((w.pos.x - step).abs() < 1e-5);
        assert_eq!(w.pos.z, 0.0);
        assert!(w.on_ground);
    }

    #[test]
    fn x_slide_auto_steps_onto_ledge() {
        // Wall across +z, a climbable ledge along +x.
        let mut g = |x: f32, z: f32| {
            if z > 0.5 {
                20.0
            } else if x > 0.5 {
                4.0
            } else {
                0.0
            }
        };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        let d = Vec3::new(1.0, 0.0, 1.0).normalized();
        w.move_with_sampler(d, 0.02, false, &mut g);
        assert!((w.pos.x - 50.0 * 0.02 * d.x).abs() < 1e-5);
        assert_eq!(w.pos.z, 0.0);
        assert_eq!(w.vel.y, 13.0);
        assert!(!w.on_ground && !w.can_jump);
    }

    #[test]
    fn blocked_x_falls_back_to_z() {
        let mut g = |x: f32, _: f32| if x > 0.5 { 20.0 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        let d = Vec3::new(1.0, 0.0, 1.0).normalized();
        w.move_with_sampler(d, 0.02, false, &mut g);
        assert_eq!(w.pos.x, 0.0);
        assert!((w.pos.z - 50.0 * 0.02 * d.z).abs() < 1e-5);
        assert!(w.on_ground);
    }

    #[test]
    fn fully_blocked_stays_put() {
        let mut g = |x: f32, z: f32| if x > 0.5 || z > 0.5 { 20.0 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.move_with_sampler(Vec3::new(1.0, 0.0, 1.0).normalized(), 0.05, false, &mut g);
        assert_eq!((w.pos.x, w.pos.z), (0.0, 0.0));
        assert!(w.moving);
    }

    #[test]
    fn auto_step_requires_ground_contact() {
        let mut g = |_: f32, z: f32| if z > 0.5 { 4.0 } else { 0.0 };
        let mut w = grounded_at(0.0, 0.0, &mut g);
        w.jump();
        w.move_with_sampler(Vec3::new(0.0, 0.0, 1.0), 0.02, false, &mut g);
        assert_eq!(w.pos.z, 0.0);
    }

    #[test]
    fn bbox_follows_position() {
        let mut g = flat(2.0);
        let w = grounded_at(3.0, -4.0, &mut g);
        assert!((w.bbox.center() - w.pos).length() < 1e-5);
        let s = w.bbox.size();
        assert!((s.x - 0.8).abs() < 1e-6 && (s.y - 2.0).abs() < 1e-6 && (s.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn spawn_lands_in_square_above_ground() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut g = flat(-3.0);
        let mut w = Walker::new(Vec3::ZERO, PlayerParams::default());
        for _ in 0..50 {
            w.spawn(&mut rng, &mut g);
            assert!(w.pos.x >= -50.0 && w.pos.x < 50.0);
            assert!(w.pos.z >= -50.0 && w.pos.z < 50.0);
            assert_eq!(w.pos.y, 2.0);
            assert!(w.can_jump && !w.on_ground);
        }
    }

    #[test]
    fn player_config_partial_toml() {
        let cfg: PlayerConfig = toml::from_str(
            r#"
            [movement]
            walk_speed = 20.0

            [jump]
            multiplier = 2.0
            "#,
        )
        .unwrap();
        let p = PlayerParams::from_config(&cfg);
        assert_eq!(p.walk_speed, 20.0);
        assert_eq!(p.run_speed, 100.0);
        assert_eq!(p.jump_multiplier, 2.0);
        assert_eq!(p.gravity, -25.0);
        assert_eq!(p.body_size, Vec3::new(0.8, 2.0, 0.8));
    }
}
