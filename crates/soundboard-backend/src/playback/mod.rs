//! Playback coordination.
//!
//! A single task owns every table keyed by sound identifier: the current load
//! or playback of each sound and its pending highlight reversion. Requests
//! reach it through a [`PlaybackHandle`], loads and timers complete inside its
//! own select loop, so none of the tables need locking.
//!
//! Every request for a sound supersedes the previous one for the same sound:
//! the old playback is stopped and its load is aborted. A completion is acted
//! on only while its request is still the current one for that sound.

mod highlight;
mod output;

use std::{collections::HashMap, time::Duration};

use futures_util::{
    FutureExt, StreamExt,
    future::{AbortHandle, Abortable, BoxFuture},
    stream::FuturesUnordered,
};
use soundboard_bridge::sound::{ElementId, HighlightState, PlayRequest, SoundId};
use tokio::sync::mpsc;

pub(crate) use self::highlight::HighlightSink;
pub(crate) use self::output::{AudioOutput, CdnAudioOutput};
use self::{highlight::HighlightTimers, output::PlaybackError};
use crate::{policy::should_play, preferences::SharedPreferences};

#[derive(Debug)]
pub(crate) enum PlaybackCommand {
    /// Load, highlight and play when the preferences allow it.
    Play(PlayRequest),
    /// Load and highlight only.
    Preview(PlayRequest),
}

/// Cloneable handle used by services to reach the coordinator.
#[derive(Debug, Clone)]
pub(crate) struct PlaybackHandle {
    commands: mpsc::Sender<PlaybackCommand>,
}

impl PlaybackHandle {
    pub(crate) fn new(commands: mpsc::Sender<PlaybackCommand>) -> Self {
        Self { commands }
    }

    pub async fn play(&self, request: PlayRequest) {
        self.submit(PlaybackCommand::Play(request)).await;
    }

    pub async fn preview(&self, request: PlayRequest) {
        self.submit(PlaybackCommand::Preview(request)).await;
    }

    async fn submit(&self, command: PlaybackCommand) {
        if let Err(error) = self.commands.send(command).await {
            log::warn!("Playback coordinator stopped, dropping {:?}", error.0);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
    Play,
    Preview,
}

struct LoadCompletion<C> {
    kind: LoadKind,
    generation: u64,
    request: PlayRequest,
    result: Result<C, PlaybackError>,
}

/// The current request of one sound.
struct ActiveSound<P> {
    generation: u64,
    load: AbortHandle,
    playback: Option<P>,
}

type PendingLoad<C> = Abortable<BoxFuture<'static, LoadCompletion<C>>>;

pub(crate) struct PlaybackCoordinator<O: AudioOutput, S: HighlightSink> {
    output: O,
    sink: S,
    preferences: SharedPreferences,
    active: HashMap<SoundId, ActiveSound<O::Playback>>,
    // kept apart so a preview never stops a real playback
    previews: HashMap<SoundId, ActiveSound<O::Playback>>,
    loads: FuturesUnordered<PendingLoad<O::Clip>>,
    timers: HighlightTimers,
    next_generation: u64,
}

impl<O: AudioOutput, S: HighlightSink> PlaybackCoordinator<O, S> {
    pub fn new(output: O, sink: S, preferences: SharedPreferences) -> Self {
        Self {
            output,
            sink,
            preferences,
            active: HashMap::new(),
            previews: HashMap::new(),
            loads: FuturesUnordered::new(),
            timers: HighlightTimers::default(),
            next_generation: 0,
        }
    }

    /// Starts the coordinator on the current runtime.
    pub fn spawn(output: O, sink: S, preferences: SharedPreferences) -> PlaybackHandle {
        let (commands_tx, commands_rx) = mpsc::channel(64);
        tokio::spawn(Self::new(output, sink, preferences).run(commands_rx));
        PlaybackHandle::new(commands_tx)
    }

    pub async fn run(mut self, mut commands: mpsc::Receiver<PlaybackCommand>) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(PlaybackCommand::Play(request)) => self.begin(LoadKind::Play, request),
                    Some(PlaybackCommand::Preview(request)) => self.begin(LoadKind::Preview, request),
                    None => break,
                },
                Some(completion) = self.loads.next(), if !self.loads.is_empty() => {
                    // aborted loads resolve to `Err(Aborted)` and need no handling
                    if let Ok(completion) = completion {
                        self.finish_load(completion).await;
                    }
                }
                Some(reversion) = self.timers.next_expired(), if !self.timers.is_idle() => {
                    self.sink
                        .set_highlight(reversion.element_id, HighlightState::Neutral)
                        .await;
                }
            }
        }
        log::debug!("Playback command channel closed, stopping coordinator");
    }

    /// Supersedes the current request for the sound, then starts loading.
    fn begin(&mut self, kind: LoadKind, request: PlayRequest) {
        let table = match kind {
            LoadKind::Play => &mut self.active,
            LoadKind::Preview => &mut self.previews,
        };

        if let Some(previous) = table.remove(&request.sound_id) {
            previous.load.abort();
            if let Some(playback) = &previous.playback {
                self.output.stop(playback);
            }
            log::debug!("Superseded {kind:?} of sound {}", request.sound_id);
        }

        let generation = self.next_generation;
        self.next_generation += 1;

        let sound_id = request.sound_id.clone();
        let load = self.output.load(sound_id.clone());
        let completion = async move {
            LoadCompletion {
                kind,
                generation,
                request,
                result: load.await,
            }
        }
        .boxed();

        let (abort, registration) = AbortHandle::new_pair();
        self.loads.push(Abortable::new(completion, registration));
        table.insert(
            sound_id,
            ActiveSound {
                generation,
                load: abort,
                playback: None,
            },
        );
    }

    async fn finish_load(&mut self, completion: LoadCompletion<O::Clip>) {
        let LoadCompletion {
            kind,
            generation,
            request,
            result,
        } = completion;
        let table = match kind {
            LoadKind::Play => &mut self.active,
            LoadKind::Preview => &mut self.previews,
        };

        let is_current = table
            .get(&request.sound_id)
            .is_some_and(|active| active.generation == generation);
        if !is_current {
            log::debug!("Dropping stale load of sound {}", request.sound_id);
            return;
        }

        let clip = match result {
            Ok(clip) => clip,
            Err(error) => {
                log::warn!("Failed to load sound {}: {error}", request.sound_id);
                table.remove(&request.sound_id);
                return;
            }
        };

        if let Some(element_id) = &request.element_id {
            let duration = self.output.clip_duration(&clip);
            self.highlight(&request.sound_id, element_id, duration).await;
        }

        if kind == LoadKind::Preview {
            return;
        }

        let preferences = self.preferences.read().await.snapshot();
        if !should_play(
            preferences.muted,
            preferences.play_send_sounds,
            request.origin.is_sent(),
        ) {
            log::debug!(
                "Not playing sound {} (origin {:?}, {preferences:?})",
                request.sound_id,
                request.origin
            );
            return;
        }

        match self.output.play(clip) {
            Ok(playback) => {
                if let Some(active) = self.active.get_mut(&request.sound_id) {
                    active.playback = Some(playback);
                }
            }
            Err(error) => log::warn!("Failed to play sound {}: {error}", request.sound_id),
        }
    }

    /// Marks `element_id` active and schedules its reversion after
    /// `duration`, replacing any reversion pending for `sound_id`.
    async fn highlight(&mut self, sound_id: &SoundId, element_id: &ElementId, duration: Duration) {
        let replaced = self
            .timers
            .restart(sound_id.clone(), element_id.clone(), duration);

        // the cancelled timer will never revert its element, do it now
        if let Some(replaced) = replaced.filter(|replaced| replaced != element_id) {
            self.sink
                .set_highlight(replaced, HighlightState::Neutral)
                .await;
        }
        self.sink
            .set_highlight(element_id.clone(), HighlightState::Active)
            .await;
    }
}
