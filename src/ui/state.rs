/// View-local state that never goes through the store.
#[derive(Debug, Default)]
pub struct UiState {
    pub input_text: String,
    pub search_input: String,
    pub show_emoji_picker: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }
}
