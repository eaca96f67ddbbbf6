use eframe::egui;

use crate::common::Message;
use crate::ui::format;

pub fn render(ui: &mut egui::Ui, messages: &[Message]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            let mut previous: Option<&Message> = None;
            for message in messages {
                let new_group = format::starts_group(message, previous);
                if new_group {
                    ui.add_space(6.0);
                }

                let layout = if message.is_own {
                    egui::Layout::right_to_left(egui::Align::TOP)
                } else {
                    egui::Layout::left_to_right(egui::Align::TOP)
                };
                ui.with_layout(layout, |ui| {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.vertical(|ui| {
                            if new_group && !message.is_own {
                                ui.label(egui::RichText::new(&message.sender.name).strong());
                            }
                            ui.label(&message.content);
                            ui.label(
                                egui::RichText::new(format::format_time(message.timestamp))
                                    .small()
                                    .weak(),
                            );
                        });
                    });
                });

                previous = Some(message);
            }
        });
}
