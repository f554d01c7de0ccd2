use std::{collections::HashMap, future::Future, time::Duration};

use futures_util::{
    FutureExt, StreamExt,
    future::{AbortHandle, Abortable, BoxFuture},
    stream::FuturesUnordered,
};
use soundboard_bridge::{
    MessageFromBackend,
    sound::{ElementId, HighlightState, SoundId},
};
use tokio::sync::mpsc::Sender;

/// Receives highlight changes decided by the playback coordinator.
pub(crate) trait HighlightSink: Send + Sync + 'static {
    fn set_highlight(
        &self,
        element_id: ElementId,
        state: HighlightState,
    ) -> impl Future<Output = ()> + Send;
}

impl HighlightSink for Sender<MessageFromBackend> {
    async fn set_highlight(&self, element_id: ElementId, state: HighlightState) {
        let message = MessageFromBackend::HighlightChanged { element_id, state };
        if self.send(message).await.is_err() {
            log::debug!("Frontend channel closed, dropping highlight change");
        }
    }
}

/// A highlight whose timer ran out and must go back to neutral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reversion {
    pub sound_id: SoundId,
    pub element_id: ElementId,
}

struct PendingTimer {
    element_id: ElementId,
    abort: AbortHandle,
}

/// Pending highlight reversions, at most one per sound.
#[derive(Default)]
pub(crate) struct HighlightTimers {
    pending: HashMap<SoundId, PendingTimer>,
    timers: FuturesUnordered<Abortable<BoxFuture<'static, Reversion>>>,
}

impl HighlightTimers {
    /// Schedules the reversion of `element_id` after `duration`, cancelling
    /// whatever timer `sound_id` had pending. Returns the element of the
    /// cancelled timer, if there was one.
    pub fn restart(
        &mut self,
        sound_id: SoundId,
        element_id: ElementId,
        duration: Duration,
    ) -> Option<ElementId> {
        let (abort, registration) = AbortHandle::new_pair();
        let reversion = Reversion {
            sound_id: sound_id.clone(),
            element_id: element_id.clone(),
        };
        let timer = async move {
            tokio::time::sleep(duration).await;
            reversion
        }
        .boxed();
        self.timers.push(Abortable::new(timer, registration));

        let previous = self
            .pending
            .insert(sound_id, PendingTimer { element_id, abort })?;
        previous.abort.abort();
        Some(previous.element_id)
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Waits for the next timer that was not cancelled. Returns `None` once
    /// no timer is left.
    pub async fn next_expired(&mut self) -> Option<Reversion> {
        while let Some(fired) = self.timers.next().await {
            if let Ok(reversion) = fired {
                self.pending.remove(&reversion.sound_id);
                return Some(reversion);
            }
        }
        None
    }
}
