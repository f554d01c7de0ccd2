//! Small pieces of UI state derived from backend data.

use std::collections::HashSet;

use gpui::SharedString;
use gpui_component::{IconName, IconNamed};

/// Icons used across the board.
///
/// Play, download and headphones are bundled with the board under
/// `icons/board/`; minus and plus come from the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Play,
    Minus,
    Download,
    Headphones,
    Plus,
}

impl IconKind {
    pub const ALL: [IconKind; 5] = [
        IconKind::Play,
        IconKind::Minus,
        IconKind::Download,
        IconKind::Headphones,
        IconKind::Plus,
    ];
}

impl IconNamed for IconKind {
    fn path(self) -> SharedString {
        match self {
            IconKind::Play => "icons/board/play.svg".into(),
            IconKind::Minus => IconName::Minus.path(),
            IconKind::Download => "icons/board/download.svg".into(),
            IconKind::Headphones => "icons/board/headphones.svg".into(),
            IconKind::Plus => IconName::Plus.path(),
        }
    }
}

/// Which stored sounds can be added to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddSoundAvailability {
    hidden_sounds: HashSet<String>,
    has_empty_slot: bool,
}

/// Visibility and enabled state of one "add sound" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddControlState {
    pub hidden: bool,
    pub disabled: bool,
}

impl AddSoundAvailability {
    pub fn new(hidden_sounds: impl IntoIterator<Item = String>, has_empty_slot: bool) -> Self {
        Self {
            hidden_sounds: hidden_sounds.into_iter().collect(),
            has_empty_slot,
        }
    }

    /// A sound already on the board hides its control; every control is
    /// disabled while the board has no free slot.
    pub fn control_state(&self, sound_name: &str) -> AddControlState {
        AddControlState {
            hidden: self.hidden_sounds.contains(sound_name),
            disabled: !self.has_empty_slot,
        }
    }
}

/// Indicator reflecting the "play send sounds" preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendIndicator {
    Enabled,
    Disabled,
}

impl SendIndicator {
    pub fn from_preference(play_send_sounds: bool) -> Self {
        if play_send_sounds {
            SendIndicator::Enabled
        } else {
            SendIndicator::Disabled
        }
    }

    pub fn icon(self) -> IconKind {
        match self {
            SendIndicator::Enabled => IconKind::Headphones,
            SendIndicator::Disabled => IconKind::Minus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SendIndicator::Enabled => "Playing sent sounds",
            SendIndicator::Disabled => "Sent sounds are silent",
        }
    }
}
