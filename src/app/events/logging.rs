use super::App;
use crate::event::EventEnvelope;

impl App {
    pub(super) fn log_event(env: &EventEnvelope) {
        use crate::event::Event as E;
        let (tick, id) = (env.tick, env.id);
        match &env.kind {
            E::Tick => {
                log::trace!(target: "events", "[tick {}] #{} Tick", tick, id);
            }
            E::MovementRequested {
                dt,
                dx,
                dz,
                running,
            } => {
                log::trace!(target: "events", "[tick {}] #{} MovementRequested dt={:.4} dir=({:.2}, {:.2}) {}",
                    tick, id, dt, dx, dz, if *running { "run" } else { "walk" });
            }
            E::JumpRequested => {
                log::debug!(target: "events", "[tick {}] #{} JumpRequested", tick, id);
            }
            E::WorldRegenerateRequested { seed } => match seed {
                Some(s) => log::info!(target: "events", "[tick {}] #{} WorldRegenerateRequested seed={}", tick, id, s),
                None => log::info!(target: "events", "[tick {}] #{} WorldRegenerateRequested seed=random", tick, id),
            },
            E::WorldGenConfigChanged => {
                log::info!(target: "events", "[tick {}] #{} WorldGenConfigChanged", tick, id);
            }
            E::ViewCenterChanged { ccx, ccz } => {
                log::debug!(target: "events", "[tick {}] #{} ViewCenterChanged ({}, {})", tick, id, ccx, ccz);
            }
        }
    }
}
