pub mod settings_item;
pub mod sound_card;
