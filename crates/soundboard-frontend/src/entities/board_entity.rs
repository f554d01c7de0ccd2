//! Board state mirrored from the server, plus the local highlight and drag
//! state drawn on top of it.

use std::collections::HashSet;

use gpui::{AppContext, Entity};
use soundboard_bridge::{
    server::{BoardSnapshot, ServerEvent},
    sound::{ElementId, HighlightState, SwapRequest},
};

use crate::{
    interaction::drag_drop::{DragDropProtocol, DraggedSound, DropCue, DropTarget},
    ui_sync::AddSoundAvailability,
};

#[derive(Debug, Clone, Default)]
pub struct BoardEntity {
    pub snapshot: BoardSnapshot,
    pub availability: AddSoundAvailability,
    pub send_enabled: bool,
    pub listeners: u32,
    highlighted: HashSet<ElementId>,
    drag: DragDropProtocol,
}

impl BoardEntity {
    /// Whether `element_id` names a slot or stored sound currently shown.
    pub fn has_element(&self, element_id: &ElementId) -> bool {
        let slots = (0..self.snapshot.slots.len()).map(ElementId::slot);
        let stored = self
            .snapshot
            .stored_sounds
            .iter()
            .map(|sound| ElementId::stored(&sound.name));
        slots.chain(stored).any(|known| &known == element_id)
    }

    pub fn is_highlighted(&self, element_id: &ElementId) -> bool {
        self.highlighted.contains(element_id)
    }

    /// Applies a highlight change and returns whether anything changed.
    /// Unknown elements are ignored.
    pub fn set_highlight(&mut self, element_id: ElementId, state: HighlightState) -> bool {
        if !self.has_element(&element_id) {
            log::debug!("Ignoring highlight of unknown element {element_id}");
            return false;
        }
        match state {
            HighlightState::Active => self.highlighted.insert(element_id),
            HighlightState::Neutral => self.highlighted.remove(&element_id),
        }
    }

    pub fn apply_event(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Board(snapshot) => {
                self.snapshot = snapshot;
                let snapshot = &self.snapshot;
                self.highlighted.retain(|element_id| {
                    (0..snapshot.slots.len()).any(|index| &ElementId::slot(index) == element_id)
                        || snapshot
                            .stored_sounds
                            .iter()
                            .any(|sound| &ElementId::stored(&sound.name) == element_id)
                });
            }
            ServerEvent::AddSoundAvailability {
                hidden_sounds,
                has_empty_slot,
            } => self.availability = AddSoundAvailability::new(hidden_sounds, has_empty_slot),
            ServerEvent::SendSoundsEnabled { enabled } => self.send_enabled = enabled,
            ServerEvent::ListenerCount { count } => self.listeners = count,
            // played by the backend, nothing to show
            ServerEvent::SoundSent { .. } => {}
        }
    }

    pub fn drop_cue(&self) -> DropCue {
        self.drag.cue()
    }

    pub fn start_drag(&mut self, dragged: DraggedSound) {
        self.drag.start(dragged);
    }

    pub fn end_drag(&mut self) {
        self.drag.end();
    }

    /// Completes the current drag over `target` and ends it.
    pub fn drop_on(&mut self, target: Option<&DropTarget>) -> Option<SwapRequest> {
        let request = self.drag.drop_on(target);
        self.drag.end();
        request
    }

    pub fn update_from_server<C: AppContext>(
        entity: &Entity<Self>,
        event: ServerEvent,
        cx: &mut C,
    ) {
        entity.update(cx, |this, cx| {
            this.apply_event(event);
            cx.notify();
        });
    }

    pub fn update_highlight<C: AppContext>(
        entity: &Entity<Self>,
        element_id: ElementId,
        state: HighlightState,
        cx: &mut C,
    ) {
        entity.update(cx, |this, cx| {
            if this.set_highlight(element_id, state) {
                cx.notify();
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use soundboard_bridge::{
        server::BoardSlot,
        sound::{SoundId, SoundSource},
    };

    use super::*;

    fn board() -> BoardEntity {
        let mut board = BoardEntity::default();
        board.apply_event(ServerEvent::Board(BoardSnapshot {
            slots: vec![
                BoardSlot {
                    sound_id: Some(SoundId::from("42")),
                    name: Some("doug".to_owned()),
                },
                BoardSlot::default(),
            ],
            stored_sounds: vec![SoundSource {
                name: "bonk".to_owned(),
                extension: ".mp3".to_owned(),
            }],
        }));
        board
    }

    #[test]
    fn highlight_of_unknown_element_is_a_no_op() {
        let mut board = board();

        assert!(!board.set_highlight(ElementId::slot(5), HighlightState::Active));
        assert!(!board.is_highlighted(&ElementId::slot(5)));

        assert!(board.set_highlight(ElementId::stored("bonk"), HighlightState::Active));
        assert!(board.is_highlighted(&ElementId::stored("bonk")));
        assert!(board.set_highlight(ElementId::stored("bonk"), HighlightState::Neutral));
        assert!(!board.is_highlighted(&ElementId::stored("bonk")));
    }

    #[test]
    fn new_board_drops_highlights_of_removed_elements() {
        let mut board = board();
        board.set_highlight(ElementId::slot(1), HighlightState::Active);
        board.set_highlight(ElementId::slot(0), HighlightState::Active);

        board.apply_event(ServerEvent::Board(BoardSnapshot {
            slots: vec![BoardSlot::default()],
            stored_sounds: Vec::new(),
        }));

        assert!(board.is_highlighted(&ElementId::slot(0)));
        assert!(!board.is_highlighted(&ElementId::slot(1)));
    }

    #[test]
    fn server_updates_refresh_the_affordances() {
        let mut board = board();

        board.apply_event(ServerEvent::AddSoundAvailability {
            hidden_sounds: vec!["bonk".to_owned()],
            has_empty_slot: false,
        });
        board.apply_event(ServerEvent::SendSoundsEnabled { enabled: true });
        board.apply_event(ServerEvent::ListenerCount { count: 4 });

        assert!(board.availability.control_state("bonk").hidden);
        assert!(board.availability.control_state("bonk").disabled);
        assert!(board.send_enabled);
        assert_eq!(board.listeners, 4);
    }

    #[test]
    fn drop_always_ends_the_drag() {
        let mut board = board();
        board.start_drag(DraggedSound::from_attributes("bonk", Some("bonk"), Some(".mp3")));
        assert_eq!(board.drop_cue(), DropCue::Ready);

        assert_eq!(board.drop_on(None), None);
        assert_eq!(board.drop_cue(), DropCue::Neutral);

        board.start_drag(DraggedSound::from_attributes("bonk", Some("bonk"), Some(".mp3")));
        let request = board
            .drop_on(Some(&DropTarget::from_attribute(0, Some("42"))))
            .unwrap();
        assert_eq!(request.add.sound_location, "bonk.mp3");
        assert_eq!(board.drop_cue(), DropCue::Neutral);
    }
}
