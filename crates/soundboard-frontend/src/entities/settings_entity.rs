use gpui::{AppContext, Entity};
use soundboard_bridge::{config::Config, preference::Preferences};

#[derive(Debug, Clone, Default)]
pub struct SettingsEntity {
    pub config: Config,
    pub preferences: Preferences,
}

impl SettingsEntity {
    pub fn update_config<C: AppContext>(entity: &Entity<Self>, config: Config, cx: &mut C) {
        entity.update(cx, |this, cx| {
            this.config = config;
            cx.notify();
        });
    }

    pub fn update_preferences<C: AppContext>(
        entity: &Entity<Self>,
        preferences: Preferences,
        cx: &mut C,
    ) {
        entity.update(cx, |this, cx| {
            this.preferences = preferences;
            cx.notify();
        });
    }
}
