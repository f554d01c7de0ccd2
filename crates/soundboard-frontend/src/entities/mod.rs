use gpui::Entity;

pub mod board_entity;
pub mod settings_entity;

#[derive(Debug, Clone)]
pub struct DataEntities {
    pub settings: Entity<settings_entity::SettingsEntity>,
    pub board: Entity<board_entity::BoardEntity>,
}
