mod handlers;
mod main_menu;

pub use handlers::{existing_run_directory, resolve_source_path};
pub use main_menu::show_main_menu;
