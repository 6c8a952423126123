pub mod app_state;
pub mod session;
pub mod settings;

pub use app_state::AppState;
pub use session::{LoadedSkin, SkinSession};
pub use settings::{default_settings_path, Settings};
