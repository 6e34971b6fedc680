mod events;
mod init;
mod state;
mod step;
mod watchers;

pub use init::AppOptions;
pub use state::{App, DebugStats};
