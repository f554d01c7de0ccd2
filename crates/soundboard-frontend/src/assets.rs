//! Application assets: the board's own icons layered over the
//! gpui-component bundle.

use std::borrow::Cow;

use gpui::{AssetSource, Result, SharedString};

static BOARD_ICONS: [(&str, &[u8]); 3] = [
    (
        "icons/board/play.svg",
        include_bytes!("../assets/icons/board/play.svg"),
    ),
    (
        "icons/board/download.svg",
        include_bytes!("../assets/icons/board/download.svg"),
    ),
    (
        "icons/board/headphones.svg",
        include_bytes!("../assets/icons/board/headphones.svg"),
    ),
];

/// Serves the board icons and defers everything else to
/// [`gpui_component_assets::Assets`].
pub struct Assets;

impl AssetSource for Assets {
    fn load(&self, path: &str) -> Result<Option<Cow<'static, [u8]>>> {
        match BOARD_ICONS.iter().find(|(icon_path, _)| *icon_path == path) {
            Some((_, bytes)) => Ok(Some(Cow::Borrowed(*bytes))),
            None => gpui_component_assets::Assets.load(path),
        }
    }

    fn list(&self, path: &str) -> Result<Vec<SharedString>> {
        let mut paths = gpui_component_assets::Assets.list(path)?;
        paths.extend(
            BOARD_ICONS
                .iter()
                .filter(|(icon_path, _)| icon_path.starts_with(path))
                .map(|(icon_path, _)| SharedString::from(*icon_path)),
        );
        Ok(paths)
    }
}
