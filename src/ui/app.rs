use eframe::egui;

use crate::common::StoreCommand;
use crate::store::StoreHandle;

use super::components::{
    chat_area, chat_header, input_bar,
    sidebar::{self, SidebarActions},
};
use super::state::UiState;

pub struct ChatApp {
    state: UiState,
    store: StoreHandle,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, store: StoreHandle) -> Self {
        Self {
            state: UiState::new(),
            store,
        }
    }

    fn dispatch(&self, command: StoreCommand) {
        let name = command.name();
        if let Err(err) = self.store.dispatch(command) {
            log::warn!("Failed to send {name} to store: {err}");
        }
    }

    fn apply_sidebar(&self, actions: SidebarActions) {
        if let Some(query) = actions.search_query {
            self.dispatch(StoreCommand::SearchChats(query));
        }
        if let Some(chat_id) = actions.select_chat_id {
            self.dispatch(StoreCommand::SelectChat { chat_id });
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let snapshot = self.store.snapshot();

        egui::SidePanel::left("chat_sidebar")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                let actions = sidebar::render(ui, &snapshot, &mut self.state);
                self.apply_sidebar(actions);
            });

        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            chat_header::render(ui, snapshot.selected_chat.as_ref());
        });

        if snapshot.selected_chat.is_some() {
            egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
                if let Some(content) = input_bar::render(ui, &mut self.state) {
                    self.dispatch(StoreCommand::SendMessage(content));
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, &snapshot.messages);
        });

        ctx.request_repaint();
    }
}
