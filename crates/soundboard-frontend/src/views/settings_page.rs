use gpui::{App, Context, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    StyledExt,
    group_box::{GroupBox, GroupBoxVariants},
    switch::Switch,
};
use soundboard_bridge::preference::PreferenceKey;

use crate::{BackendBridge, components::settings_item::SettingsItem, entities::DataEntities};

fn toggle_preference(key: PreferenceKey, value: bool, cx: &mut App) {
    let bridge = cx.global::<BackendBridge>().clone();
    cx.spawn(async move |_| {
        bridge.update_preference(key, value).await;
    })
    .detach();
}

pub struct SettingsPage {
    data: DataEntities,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.settings, |_, _, cx| cx.notify()).detach();
        Self { data: data.clone() }
    }
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let (config, preferences) = {
            let settings_state = self.data.settings.read(cx);
            (settings_state.config.clone(), settings_state.preferences)
        };

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Playback").text_xl().font_bold())
                    .child(
                        SettingsItem::new("Mute sounds")
                            .description("Silences every sound, local or sent.")
                            .control(
                                Switch::new(PreferenceKey::MuteSounds.storage_key())
                                    .checked(preferences.muted)
                                    .on_click(|checked: &bool, _, cx| {
                                        toggle_preference(PreferenceKey::MuteSounds, *checked, cx)
                                    }),
                            ),
                    )
                    .child(
                        SettingsItem::new("Play sent sounds")
                            .description(
                                "Hear sounds sent to the channel instead of the ones you click.",
                            )
                            .control(
                                Switch::new(PreferenceKey::PlaySendSounds.storage_key())
                                    .checked(preferences.play_send_sounds)
                                    .on_click(|checked: &bool, _, cx| {
                                        toggle_preference(
                                            PreferenceKey::PlaySendSounds,
                                            *checked,
                                            cx,
                                        )
                                    }),
                            ),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Server").text_xl().font_bold())
                    .child(SettingsItem::new("Address").control(config.server.base_url))
                    .child(SettingsItem::new("Event feed").control(config.server.events_url))
                    .child(SettingsItem::new("Sound CDN").control(config.audio.cdn_base_url)),
            )
    }
}
