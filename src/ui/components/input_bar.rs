use eframe::egui;

use crate::ui::state::UiState;

pub const QUICK_EMOJIS: [&str; 8] = ["😊", "😂", "👍", "❤️", "🎉", "🙏", "😮", "😢"];

/// Composer guard: blank or whitespace-only text is never submitted. The
/// untrimmed text is returned and the field cleared.
pub fn take_submission(input_text: &mut String) -> Option<String> {
    if input_text.trim().is_empty() {
        return None;
    }
    Some(std::mem::take(input_text))
}

pub fn render(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut send = false;

    if state.show_emoji_picker {
        ui.horizontal(|ui| {
            for emoji in QUICK_EMOJIS {
                if ui.button(emoji).clicked() {
                    state.input_text.push_str(emoji);
                    state.show_emoji_picker = false;
                }
            }
        });
    }

    ui.horizontal(|ui| {
        if ui.button("🙂").clicked() {
            state.show_emoji_picker = !state.show_emoji_picker;
        }

        let response = ui.text_edit_singleline(&mut state.input_text);
        if ui.button("Send").clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if !send {
        return None;
    }
    let message = take_submission(&mut state.input_text)?;
    state.show_emoji_picker = false;
    Some(message)
}
