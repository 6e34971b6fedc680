use vista_geom::Vec3;

/// One frame of player intent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Planar movement direction; zero when idle.
    pub direction: Vec3,
    pub running: bool,
    pub jump: bool,
    pub regenerate: bool,
}

pub trait InputSource {
    fn poll(&mut self, tick: u64, dt: f32) -> InputFrame;
}

/// Scripted walker for headless runs: wanders on a slowly turning heading,
/// alternates walking and running, jumps on a fixed cadence.
#[derive(Clone, Debug)]
pub struct Autopilot {
    heading: f32,
    pub turn_rate: f32,     // radians per second
    pub leg_ticks: u64,     // ticks per walk/run leg
    pub jump_every: u64,    // 0 = never
    pub pause_every: u64,   // every n-th leg stands still; 0 = never
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            heading: 0.0,
            turn_rate: 0.15,
            leg_ticks: 240,
            jump_every: 150,
            pause_every: 5,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, tick: u64, dt: f32) -> InputFrame {
        let leg = tick / self.leg_ticks.max(1);
        let paused = self.pause_every > 0 && leg % self.pause_every == self.pause_every - 1;
        self.heading = (self.heading + self.turn_rate * dt).rem_euclid(std::f32::consts::TAU);
        let direction = if paused {
            Vec3::ZERO
        } else {
            Vec3::new(self.heading.sin(), 0.0, self.heading.cos())
        };
        InputFrame {
            direction,
            running: !paused && leg % 2 == 1,
            jump: self.jump_every > 0 && tick > 0 && tick % self.jump_every == 0,
            regenerate: false,
        }
    }
}
