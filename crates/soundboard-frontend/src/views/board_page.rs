use gpui::{
    App, AppContext, Context, InteractiveElement, IntoElement, MouseButton, MouseUpEvent,
    ParentElement, Render, SharedString, StatefulInteractiveElement, Styled, Window, div, px,
};
use gpui_component::{
    ActiveTheme, Disableable, Icon, StyledExt,
    button::{Button, ButtonVariants},
};
use soundboard_bridge::{
    server::BoardSlot,
    sound::{ElementId, PlayRequest, QuickplayRequest, SoundSource, SwapRequest},
};

use crate::{
    BackendBridge,
    components::sound_card::{CardTone, SoundCard},
    entities::{DataEntities, board_entity::BoardEntity},
    interaction::drag_drop::{DraggedSound, DropCue, DropTarget},
    ui_sync::{IconKind, SendIndicator},
};

fn play_sound(request: PlayRequest, cx: &mut App) {
    let bridge = cx.global::<BackendBridge>().clone();
    cx.spawn(async move |_| bridge.play_sound(request).await)
        .detach();
}

fn preview_sound(request: PlayRequest, cx: &mut App) {
    let bridge = cx.global::<BackendBridge>().clone();
    cx.spawn(async move |_| bridge.preview_sound(request).await)
        .detach();
}

fn quickplay(request: QuickplayRequest, cx: &mut App) {
    let bridge = cx.global::<BackendBridge>().clone();
    cx.spawn(async move |_| bridge.quickplay(request).await)
        .detach();
}

fn swap_sound(request: SwapRequest, cx: &mut App) {
    let bridge = cx.global::<BackendBridge>().clone();
    cx.spawn(async move |_| bridge.swap_sound(request).await)
        .detach();
}

/// Preview following the pointer while a stored sound is dragged.
struct DragPreview {
    label: SharedString,
}

impl Render for DragPreview {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .px_3()
            .py_1()
            .rounded(px(6.0))
            .bg(cx.theme().secondary)
            .border_1()
            .border_color(cx.theme().info)
            .child(self.label.clone())
    }
}

pub struct BoardPage {
    data: DataEntities,
}

impl BoardPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.board, |_, _, cx| cx.notify()).detach();
        cx.observe(&data.settings, |_, _, cx| cx.notify()).detach();
        Self { data: data.clone() }
    }

    /// Completes the drag over `target` (none when released over the board
    /// itself) and submits the resulting swap.
    fn drop_on(&mut self, target: Option<DropTarget>, cx: &mut Context<Self>) {
        let request = self.data.board.update(cx, |board, cx| {
            let request = board.drop_on(target.as_ref());
            cx.notify();
            request
        });
        match request {
            Some(request) => swap_sound(request, cx),
            None => log::debug!("Drop ignored"),
        }
    }

    fn end_drag(&mut self, cx: &mut Context<Self>) {
        self.data.board.update(cx, |board, cx| {
            if board.drop_cue() == DropCue::Ready {
                board.end_drag();
                cx.notify();
            }
        });
    }

    fn render_slot(
        &self,
        index: usize,
        slot: &BoardSlot,
        board: &BoardEntity,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let element_id = ElementId::slot(index);
        let tone = CardTone::resolve(board.is_highlighted(&element_id), board.drop_cue());
        let target = DropTarget::from_attribute(
            index,
            slot.sound_id.as_ref().map(|sound_id| sound_id.as_str()),
        );
        let title = slot.name.clone().unwrap_or_else(|| "Empty slot".to_owned());

        let mut card = SoundCard::new(title, tone).subtitle(format!("Slot {}", index + 1));
        if let Some(sound_id) = slot.sound_id.clone() {
            let clip_url = self.data.settings.read(cx).config.audio.sound_url(&sound_id);
            let play_request = PlayRequest::local(Some(element_id.clone()), sound_id.clone());
            let preview_request = PlayRequest::local(Some(element_id), sound_id);
            card = card
                .action(
                    Button::new(("play", index))
                        .icon(IconKind::Play)
                        .ghost()
                        .tooltip("Play")
                        .on_click(move |_, _, cx| play_sound(play_request.clone(), cx)),
                )
                .action(
                    Button::new(("preview", index))
                        .icon(IconKind::Headphones)
                        .ghost()
                        .tooltip("Highlight without playing")
                        .on_click(move |_, _, cx| preview_sound(preview_request.clone(), cx)),
                )
                .action(
                    Button::new(("download", index))
                        .icon(IconKind::Download)
                        .ghost()
                        .tooltip("Open the clip")
                        .on_click(move |_, _, cx| cx.open_url(&clip_url)),
                );
        }

        div()
            .id(("slot", index))
            .drag_over::<DraggedSound>(|style, _, _, cx| style.bg(cx.theme().accent))
            .on_drop(cx.listener(move |this, _: &DraggedSound, _, cx| {
                this.drop_on(Some(target.clone()), cx);
            }))
            .child(card)
    }

    fn render_stored_sound(
        &self,
        index: usize,
        source: &SoundSource,
        board: &BoardEntity,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let element_id = ElementId::stored(&source.name);
        let tone = CardTone::resolve(board.is_highlighted(&element_id), DropCue::Neutral);
        let control = board.availability.control_state(&source.name);
        let dragged = DraggedSound::from_attributes(
            source.name.clone(),
            Some(&source.name),
            Some(&source.extension),
        );

        let quickplay_request = QuickplayRequest {
            sound_location: source.name.clone(),
            ordinal: element_id,
        };
        let add_request = SwapRequest::new(source, None);
        let board_entity = self.data.board.clone();

        let mut card = SoundCard::new(source.location(), tone).action(
            Button::new(("send", index))
                .icon(IconKind::Play)
                .ghost()
                .tooltip("Send to channel")
                .disabled(!board.send_enabled)
                .on_click(move |_, _, cx| quickplay(quickplay_request.clone(), cx)),
        );
        if !control.hidden {
            card = card.action(
                Button::new(("add", index))
                    .icon(IconKind::Plus)
                    .ghost()
                    .tooltip("Add to an empty slot")
                    .disabled(control.disabled)
                    .on_click(move |_, _, cx| swap_sound(add_request.clone(), cx)),
            );
        }

        div()
            .id(("stored", index))
            .cursor_grab()
            .on_drag(dragged, move |dragged: &DraggedSound, _, _, cx: &mut App| {
                board_entity.update(cx, |board, cx| {
                    board.start_drag(dragged.clone());
                    cx.notify();
                });
                let label = SharedString::from(dragged.label.clone());
                cx.new(|_| DragPreview { label })
            })
            .child(card)
    }
}

impl Render for BoardPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let board = self.data.board.read(cx).clone();
        let indicator = SendIndicator::from_preference(
            self.data.settings.read(cx).preferences.play_send_sounds,
        );

        let slots = board
            .snapshot
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| self.render_slot(index, slot, &board, cx).into_any_element())
            .collect::<Vec<_>>();
        let stored_sounds = board
            .snapshot
            .stored_sounds
            .iter()
            .enumerate()
            .map(|(index, source)| {
                self.render_stored_sound(index, source, &board, cx)
                    .into_any_element()
            })
            .collect::<Vec<_>>();

        div()
            .id("board")
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .on_drop(cx.listener(|this, _: &DraggedSound, _, cx| this.drop_on(None, cx)))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, _: &MouseUpEvent, _, cx| this.end_drag(cx)),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, _: &MouseUpEvent, _, cx| this.end_drag(cx)),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(div().child("Board").text_2xl().font_bold())
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_3()
                            .text_sm()
                            .text_color(cx.theme().muted_foreground)
                            .child(format!("{} listening", board.listeners))
                            .child(Icon::new(indicator.icon()))
                            .child(indicator.label()),
                    ),
            )
            .child(div().flex().flex_wrap().gap_3().children(slots))
            .child(div().child("Stored sounds").text_xl().font_bold())
            .child(div().flex().flex_wrap().gap_3().children(stored_sounds))
    }
}
