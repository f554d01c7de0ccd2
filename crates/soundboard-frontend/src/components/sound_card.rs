use gpui::{
    AnyElement, IntoElement, ParentElement, SharedString, Styled, div, prelude::FluentBuilder, px,
};
use gpui_component::{ActiveTheme, StyledExt};

use crate::interaction::drag_drop::DropCue;

/// Border treatment of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    /// A drag is in progress and this card accepts it.
    DropReady,
    /// The card's clip is playing.
    Highlighted,
}

impl CardTone {
    /// Highlight wins over the drop cue.
    pub fn resolve(highlighted: bool, cue: DropCue) -> Self {
        match (highlighted, cue) {
            (true, _) => CardTone::Highlighted,
            (false, DropCue::Ready) => CardTone::DropReady,
            (false, DropCue::Neutral) => CardTone::Neutral,
        }
    }
}

/// Frame shared by slot and stored sound cards: a title, an optional
/// subtitle and a row of actions.
#[derive(IntoElement)]
pub struct SoundCard {
    title: SharedString,
    subtitle: Option<SharedString>,
    tone: CardTone,
    actions: Vec<AnyElement>,
}

impl SoundCard {
    pub fn new(title: impl Into<SharedString>, tone: CardTone) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            tone,
            actions: Vec::new(),
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<SharedString>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn action(mut self, action: impl IntoElement) -> Self {
        self.actions.push(action.into_any_element());
        self
    }
}

impl gpui::RenderOnce for SoundCard {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let theme = cx.theme();
        let border_color = match self.tone {
            CardTone::Neutral => theme.border,
            CardTone::DropReady => theme.info,
            CardTone::Highlighted => theme.success,
        };

        div()
            .min_w(px(220.0))
            .p_3()
            .flex()
            .flex_col()
            .gap_2()
            .rounded(px(8.0))
            .border_2()
            .border_color(border_color)
            .bg(theme.background)
            .child(div().child(self.title).text_lg().font_bold())
            .when_some(self.subtitle, |this, subtitle| {
                this.child(
                    div()
                        .text_sm()
                        .text_color(theme.muted_foreground)
                        .child(subtitle),
                )
            })
            .child(div().flex().gap_2().children(self.actions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_takes_precedence_over_the_drop_cue() {
        assert_eq!(CardTone::resolve(true, DropCue::Ready), CardTone::Highlighted);
        assert_eq!(CardTone::resolve(false, DropCue::Ready), CardTone::DropReady);
        assert_eq!(CardTone::resolve(false, DropCue::Neutral), CardTone::Neutral);
    }
}
