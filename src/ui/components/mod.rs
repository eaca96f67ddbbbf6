pub mod chat_area;
pub mod chat_header;
pub mod input_bar;
pub mod sidebar;
