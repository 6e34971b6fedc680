use std::collections::{BTreeMap, VecDeque};

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Time housekeeping
    Tick,

    // Input-derived intents
    MovementRequested { dt: f32, dx: f32, dz: f32, running: bool },
    JumpRequested,
    WorldRegenerateRequested { seed: Option<f64> },

    // Config
    WorldGenConfigChanged,

    // Player/view
    ViewCenterChanged { ccx: i32, ccz: i32 },
}

impl Event {
    pub fn label(&self) -> &'static str {
        match self {
            Event::Tick => "Tick",
            Event::MovementRequested { .. } => "MovementRequested",
            Event::JumpRequested => "JumpRequested",
            Event::WorldRegenerateRequested { .. } => "WorldRegenerateRequested",
            Event::WorldGenConfigChanged => "WorldGenConfigChanged",
            Event::ViewCenterChanged { .. } => "ViewCenterChanged",
        }
    }
}

pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: Event,
}

pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            by_tick: BTreeMap::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit_now(&mut self, kind: Event) -> u64 {
        self.emit_at(self.now, kind)
    }

    pub fn emit_at(&mut self, tick: u64, kind: Event) -> u64 {
        let id = self.alloc_id();
        let env = EventEnvelope { id, tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
        id
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick.get_mut(&self.now).and_then(|q| q.pop_front())
    }

    /// Events waiting in the current and future ticks.
    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }

    pub fn advance_tick(&mut self) {
        // Anything left in the current bucket rolls over to the next tick.
        if let Some(mut rest) = self.by_tick.remove(&self.now) {
            let next = self.now.wrapping_add(1);
            if !rest.is_empty() {
                for env in rest.iter_mut() {
                    env.tick = next;
                }
                let bucket = self.by_tick.entry(next).or_default();
                rest.extend(bucket.drain(..));
                *bucket = rest;
            }
        }
        self.now = self.now.wrapping_add(1);
    }
}
