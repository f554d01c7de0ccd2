//! Slot reassignment by drag and drop.
//!
//! The protocol is a two-state machine (`Idle -> Dragging -> Idle`). Drag
//! sources and drop targets are turned into typed values once, when the
//! board is rendered, so the protocol never looks at raw attribute strings.
//!
//! Resolving the target under the pointer is left to gpui: a drop is
//! delivered to the innermost element registered for [`DraggedSound`], which
//! is either a slot (carrying its [`DropTarget`]) or the board itself
//! (no target, so the drop is inert).

use soundboard_bridge::sound::{SoundId, SoundSource, SwapRequest};

/// The payload carried by a dragged stored sound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraggedSound {
    /// Text shown in the drag preview.
    pub label: String,
    /// `None` when the element lacks its name or extension; dropping it is a
    /// no-op.
    pub source: Option<SoundSource>,
}

impl DraggedSound {
    pub fn from_attributes(
        label: impl Into<String>,
        name: Option<&str>,
        extension: Option<&str>,
    ) -> Self {
        Self {
            label: label.into(),
            source: SoundSource::from_parts(name, extension),
        }
    }
}

/// A slot that accepts drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub slot_index: usize,
    /// Sound currently bound to the slot; it is deleted by the swap.
    pub sound_id: Option<SoundId>,
}

impl DropTarget {
    /// An absent or empty sound id both mean the slot is free.
    pub fn from_attribute(slot_index: usize, sound_id: Option<&str>) -> Self {
        Self {
            slot_index,
            sound_id: sound_id
                .filter(|sound_id| !sound_id.is_empty())
                .map(SoundId::from),
        }
    }
}

/// Visual cue applied to every drop target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DropCue {
    #[default]
    Neutral,
    /// A drag is in progress and the target can receive it.
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DragState {
    #[default]
    Idle,
    Dragging(DraggedSound),
}

/// Holds the single in-flight drag.
#[derive(Debug, Clone, Default)]
pub struct DragDropProtocol {
    state: DragState,
}

impl DragDropProtocol {
    /// Starts a drag, replacing any drag that never completed.
    pub fn start(&mut self, dragged: DraggedSound) {
        self.state = DragState::Dragging(dragged);
    }

    /// Ends the drag, dropped or not.
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn cue(&self) -> DropCue {
        if self.is_dragging() {
            DropCue::Ready
        } else {
            DropCue::Neutral
        }
    }

    /// Completes the drag over `target` and builds the swap to submit.
    ///
    /// Returns `None` without a target, without an active drag, or when the
    /// dragged sound lacks its name or extension.
    pub fn drop_on(&mut self, target: Option<&DropTarget>) -> Option<SwapRequest> {
        let target = target?;
        let DragState::Dragging(dragged) = std::mem::take(&mut self.state) else {
            return None;
        };
        let source = dragged.source?;
        Some(SwapRequest::new(&source, target.sound_id.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_mp3() -> DraggedSound {
        DraggedSound::from_attributes("foo", Some("foo"), Some(".mp3"))
    }

    #[test]
    fn drop_onto_bound_slot_replaces_its_sound() {
        let mut protocol = DragDropProtocol::default();
        protocol.start(foo_mp3());

        let request = protocol
            .drop_on(Some(&DropTarget::from_attribute(0, Some("42"))))
            .unwrap();

        assert_eq!(request.add.sound_location, "foo.mp3");
        assert_eq!(
            request.delete.map(|delete| delete.sound_id),
            Some(SoundId::from("42"))
        );
        assert!(!protocol.is_dragging());
    }

    #[test]
    fn drop_onto_free_slot_has_no_delete() {
        let mut protocol = DragDropProtocol::default();
        protocol.start(foo_mp3());

        let request = protocol
            .drop_on(Some(&DropTarget::from_attribute(3, Some(""))))
            .unwrap();

        assert_eq!(request.delete, None);
        assert_eq!(DropTarget::from_attribute(3, None).sound_id, None);
    }

    #[test]
    fn dragged_sound_without_extension_sends_nothing() {
        let mut protocol = DragDropProtocol::default();
        protocol.start(DraggedSound::from_attributes("foo", Some("foo"), None));

        assert_eq!(
            protocol.drop_on(Some(&DropTarget::from_attribute(0, Some("42")))),
            None
        );
        assert!(!protocol.is_dragging());
    }

    #[test]
    fn drop_without_target_or_drag_is_inert() {
        let mut protocol = DragDropProtocol::default();
        assert_eq!(
            protocol.drop_on(Some(&DropTarget::from_attribute(0, None))),
            None
        );

        protocol.start(foo_mp3());
        assert_eq!(protocol.drop_on(None), None);
        // the drag is still alive until it actually ends
        assert!(protocol.is_dragging());
    }

    #[test]
    fn cue_follows_the_drag_lifecycle() {
        let mut protocol = DragDropProtocol::default();
        assert_eq!(protocol.cue(), DropCue::Neutral);

        protocol.start(foo_mp3());
        assert_eq!(protocol.cue(), DropCue::Ready);

        protocol.end();
        assert_eq!(protocol.cue(), DropCue::Neutral);
    }

    #[test]
    fn new_drag_replaces_the_previous_one() {
        let mut protocol = DragDropProtocol::default();
        protocol.start(DraggedSound::from_attributes("old", Some("old"), Some(".ogg")));
        protocol.start(foo_mp3());

        let request = protocol
            .drop_on(Some(&DropTarget::from_attribute(1, None)))
            .unwrap();
        assert_eq!(request.add.sound_location, "foo.mp3");
    }
}
