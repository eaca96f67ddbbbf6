use eframe::egui;

use crate::common::StoreSnapshot;
use crate::ui::format;
use crate::ui::state::UiState;

const UNREAD_BADGE: egui::Color32 = egui::Color32::from_rgb(0x00, 0x84, 0xff);

#[derive(Default)]
pub struct SidebarActions {
    pub select_chat_id: Option<String>,
    pub search_query: Option<String>,
}

pub fn render(ui: &mut egui::Ui, snapshot: &StoreSnapshot, state: &mut UiState) -> SidebarActions {
    let mut actions = SidebarActions::default();
    let me = &snapshot.current_user;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format::initial(me)).strong());
        ui.heading(&me.name);
        ui.colored_label(format::status_color(me.status), "●");
    });
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("🔍");
        if ui.text_edit_singleline(&mut state.search_input).changed() {
            actions.search_query = Some(state.search_input.clone());
        }
    });
    ui.separator();

    let visible = format::filter_chats(&snapshot.chats, &state.search_input);
    if visible.is_empty() {
        ui.label("No chats found");
        return actions;
    }

    let selected_id = snapshot.selected_chat_id();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for chat in visible {
            let Some(peer) = chat.peer() else {
                continue;
            };

            ui.horizontal(|ui| {
                ui.colored_label(format::status_color(peer.status), "●");

                let is_selected = selected_id == Some(chat.id.as_str());
                if ui.selectable_label(is_selected, &peer.name).clicked() {
                    actions.select_chat_id = Some(chat.id.clone());
                }

                ui.label(
                    egui::RichText::new(format::format_time(chat.last_message_time))
                        .small()
                        .weak(),
                );
                if chat.unread_count > 0 {
                    ui.label(
                        egui::RichText::new(chat.unread_count.to_string())
                            .strong()
                            .color(egui::Color32::WHITE)
                            .background_color(UNREAD_BADGE),
                    );
                }
            });
            ui.label(egui::RichText::new(&chat.last_message).weak());
            ui.add_space(4.0);
        }
    });

    actions
}
