use std::{
    collections::HashMap,
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc,
    },
    thread,
};

use kira::{
    AudioManager, AudioManagerSettings, Tween,
    backend::{Backend, DefaultBackend},
    sound::{PlaybackState, static_sound::StaticSoundHandle},
};

use crate::clip::Clip;

/// Errors that can occur while starting or talking to the audio engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The output backend could not be opened (no device, device busy, ...).
    #[error("failed to open audio output: {0}")]
    Backend(String),
    /// The engine thread could not be spawned.
    #[error("failed to spawn audio engine thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The engine thread has stopped and no longer accepts commands.
    #[error("audio engine is not running")]
    Stopped,
}

/// Identifies one started playback inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

enum EngineCommand {
    Play { id: PlaybackId, clip: Clip },
    Stop(PlaybackId),
}

/// Handle to the audio engine thread.
///
/// The output device and every live sound handle are owned by a single
/// thread; this handle only forwards commands to it, so it can be shared
/// freely between async tasks.
pub struct AudioEngine {
    commands: mpsc::Sender<EngineCommand>,
    next_id: AtomicU64,
}

impl AudioEngine {
    /// Opens the default output device on a dedicated thread.
    ///
    /// Blocks until the device is open, so a missing output device is
    /// reported here rather than on the first playback.
    pub fn start() -> Result<Self, EngineError> {
        Self::start_with::<DefaultBackend>()
    }

    /// Same as [`AudioEngine::start`] on an arbitrary kira backend with its
    /// default settings.
    pub fn start_with<B>() -> Result<Self, EngineError>
    where
        B: Backend + 'static,
        B::Settings: Default,
        B::Error: Debug,
    {
        let (command_tx, command_rx) = mpsc::channel();
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::Builder::new()
            .name("audio-engine".to_owned())
            .spawn(move || {
                let manager = match AudioManager::<B>::new(AudioManagerSettings::default()) {
                    Ok(manager) => {
                        let _ = ready_tx.send(Ok(()));
                        manager
                    }
                    Err(error) => {
                        let _ = ready_tx.send(Err(EngineError::Backend(format!("{error:?}"))));
                        return;
                    }
                };
                run_engine(manager, command_rx);
            })?;

        ready_rx.recv().map_err(|_| EngineError::Stopped)??;
        log::info!("Audio engine started");

        Ok(Self {
            commands: command_tx,
            next_id: AtomicU64::new(0),
        })
    }

    /// Starts playing `clip` from the beginning.
    pub fn play(&self, clip: Clip) -> Result<PlaybackId, EngineError> {
        let id = PlaybackId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.commands
            .send(EngineCommand::Play { id, clip })
            .map_err(|_| EngineError::Stopped)?;
        Ok(id)
    }

    /// Stops a playback for good and frees its slot on the mixer. Stopping a
    /// playback that already ended is a no-op.
    pub fn stop(&self, id: PlaybackId) -> Result<(), EngineError> {
        self.commands
            .send(EngineCommand::Stop(id))
            .map_err(|_| EngineError::Stopped)
    }
}

/// State owned by the engine thread.
struct EngineState<B: Backend> {
    manager: AudioManager<B>,
    playing: HashMap<PlaybackId, StaticSoundHandle>,
}

impl<B: Backend> EngineState<B> {
    fn new(manager: AudioManager<B>) -> Self {
        Self {
            manager,
            playing: HashMap::new(),
        }
    }

    fn handle(&mut self, command: EngineCommand) {
        // finished sounds are dropped lazily, on the next command
        self.playing
            .retain(|_, handle| handle.state() != PlaybackState::Stopped);

        match command {
            EngineCommand::Play { id, clip } => match self.manager.play(clip.into_sound_data()) {
                Ok(handle) => {
                    self.playing.insert(id, handle);
                }
                Err(error) => log::warn!("Failed to start playback {id:?}: {error:?}"),
            },
            // a paused sound keeps its mixer slot forever once its handle is
            // gone, so superseded sounds are stopped
            EngineCommand::Stop(id) => {
                if let Some(mut handle) = self.playing.remove(&id) {
                    handle.stop(Tween::default());
                }
            }
        }
    }
}

fn run_engine<B: Backend>(manager: AudioManager<B>, commands: mpsc::Receiver<EngineCommand>) {
    let mut state = EngineState::new(manager);
    while let Ok(command) = commands.recv() {
        state.handle(command);
    }
    log::debug!("Audio engine command channel closed, stopping");
}

#[cfg(test)]
mod tests {
    use kira::backend::mock::{MockBackend, MockBackendSettings};

    use super::*;
    use crate::clip::silent_wav;

    fn ten_second_clip() -> Clip {
        Clip::decode(silent_wav(8000, 80_000)).unwrap()
    }

    fn mock_engine() -> EngineState<MockBackend> {
        let manager = AudioManager::<MockBackend>::new(AudioManagerSettings {
            backend_settings: MockBackendSettings {
                sample_rate: 48_000,
            },
            ..Default::default()
        })
        .unwrap();
        EngineState::new(manager)
    }

    fn render(engine: &mut EngineState<MockBackend>, batches: usize) {
        for _ in 0..batches {
            let backend = engine.manager.backend_mut();
            backend.on_start_processing();
            backend.process();
        }
    }

    #[test]
    fn superseded_playbacks_free_their_mixer_slot() {
        let mut engine = mock_engine();
        let clip = ten_second_clip();

        // well past the main track's default capacity of 128 sounds
        for index in 0..300 {
            let id = PlaybackId(index);
            engine.handle(EngineCommand::Play {
                id,
                clip: clip.clone(),
            });
            assert!(
                engine.playing.contains_key(&id),
                "playback #{index} did not start"
            );

            engine.handle(EngineCommand::Stop(id));
            assert!(!engine.playing.contains_key(&id));
            render(&mut engine, 50);
        }
    }

    #[test]
    fn stopping_an_unknown_playback_is_a_no_op() {
        let mut engine = mock_engine();
        engine.handle(EngineCommand::Stop(PlaybackId(7)));
        assert!(engine.playing.is_empty());
    }

    #[test]
    fn engine_thread_accepts_commands_until_dropped() {
        let engine = AudioEngine::start_with::<MockBackend>().unwrap();

        let first = engine.play(ten_second_clip()).unwrap();
        let second = engine.play(ten_second_clip()).unwrap();
        assert_ne!(first, second);
        engine.stop(first).unwrap();
        engine.stop(PlaybackId(99)).unwrap();
    }
}
