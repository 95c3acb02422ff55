//! Playback surface abstraction

use std::sync::{Arc, Mutex};

/// Commands the portal sends to whatever plays the video.
///
/// Events flow the other way: a real surface reports position updates,
/// play-state changes, and completion back through the tracker's intake
/// methods. The trait only covers the command direction.
pub trait PlaybackSurface: Send {
    /// Point the surface at the required video.
    fn load(&mut self, source_url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek back to the start of the video.
    fn rewind(&mut self);
}

/// One command received by a [`SimulatedSurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCommand {
    Load(String),
    Play,
    Pause,
    Rewind,
}

/// Command-recording surface for tests and demos.
///
/// Clones share the same command log, so a caller can keep one clone
/// for assertions and hand another to the tracker.
#[derive(Clone, Default)]
pub struct SimulatedSurface {
    commands: Arc<Mutex<Vec<SurfaceCommand>>>,
}

impl SimulatedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the surface has been told to do, in order.
    pub fn commands(&self) -> Vec<SurfaceCommand> {
        match self.commands.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }

    fn record(&self, command: SurfaceCommand) {
        if let Ok(mut guard) = self.commands.lock() {
            guard.push(command);
        }
    }
}

impl PlaybackSurface for SimulatedSurface {
    fn load(&mut self, source_url: &str) {
        self.record(SurfaceCommand::Load(source_url.to_string()));
    }

    fn play(&mut self) {
        self.record(SurfaceCommand::Play);
    }

    fn pause(&mut self) {
        self.record(SurfaceCommand::Pause);
    }

    fn rewind(&mut self) {
        self.record(SurfaceCommand::Rewind);
    }
}
