use eframe::egui;

use crate::common::Chat;
use crate::ui::format;

pub fn render(ui: &mut egui::Ui, chat: Option<&Chat>) {
    let Some(peer) = chat.and_then(Chat::peer) else {
        ui.heading("Select a chat to start messaging");
        return;
    };

    ui.horizontal(|ui| {
        ui.heading(&peer.name);
        ui.colored_label(format::status_color(peer.status), "●");
        ui.label(egui::RichText::new(peer.status.label()).weak());
    });
}
