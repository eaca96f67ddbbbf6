/// Commands the UI sends down to the store engine.
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Focus a chat from the current list and regenerate its history.
    SelectChat { chat_id: String },
    /// Append an own message to the selected chat and schedule a peer reply.
    SendMessage(String),
    /// Record the sidebar search query. Filtering is left to the view.
    SearchChats(String),
    MarkChatAsRead { chat_id: String },
    /// Stop the engine; pending replies are discarded.
    Shutdown,
}

impl StoreCommand {
    pub fn name(&self) -> &'static str {
        match self {
            StoreCommand::SelectChat { .. } => "select_chat",
            StoreCommand::SendMessage(_) => "send_message",
            StoreCommand::SearchChats(_) => "search_chats",
            StoreCommand::MarkChatAsRead { .. } => "mark_chat_as_read",
            StoreCommand::Shutdown => "shutdown",
        }
    }
}
