mod board_page;
mod settings_page;

use gpui::{AnyView, AppContext, Context, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    IconName, Root, Side,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};

use crate::{
    entities::DataEntities,
    views::{board_page::BoardPage, settings_page::SettingsPage},
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    Board,
    Settings,
}

pub struct FrontendUi {
    data: DataEntities,
    active_page: PageUi,
    active_page_view: AnyView,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, _window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial_view = cx.new(|cx| BoardPage::new(data, cx)).into();
        Self {
            data: data.clone(),
            active_page: PageUi::Board,
            active_page_view: initial_view,
        }
    }

    pub fn change_page(&mut self, page: PageUi, cx: &mut Context<Self>) {
        let new_page = match page {
            PageUi::Board => cx.new(|cx| BoardPage::new(&self.data, cx)).into(),
            PageUi::Settings => cx.new(|cx| SettingsPage::new(&self.data, cx)).into(),
        };
        self.active_page = page;
        self.active_page_view = new_page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let notification_layer = Root::render_notification_layer(window, cx);
        let on_page_change = |page| {
            cx.listener(move |this, _, _, cx| {
                this.change_page(page, cx);
            })
        };

        div()
            .flex()
            .size_full()
            .child(
                Sidebar::new(Side::Left)
                    .header(SidebarHeader::new().child("soundboard"))
                    .child(
                        SidebarGroup::new("Navigation").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("Board")
                                        .active(self.active_page == PageUi::Board)
                                        .icon(IconName::LayoutDashboard)
                                        .on_click(on_page_change(PageUi::Board)),
                                )
                                .child(
                                    SidebarMenuItem::new("Settings")
                                        .active(self.active_page == PageUi::Settings)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Settings)),
                                ),
                        ),
                    ),
            )
            .child(div().p_5().size_full().child(self.active_page_view.clone()))
            .children(notification_layer)
    }
}
