pub mod derived;
pub mod fields;
pub mod state;
pub mod store;

pub use derived::{GameRule, PRESET_MAX_DEPTH, UNLIMITED_TIME};
pub use fields::{BOARD_PROPERTIES_TO_SAVE, PROPERTIES_TO_SAVE, is_board_persisted, is_persisted};
pub use state::{
    BoardStyle, CONFIG_PROFILES, ClickCheck, HostCapabilities, PvEvalDisplay, Settings,
    ThinkTimeOption,
};
pub use store::{ENTRY_TTL_DAYS, LoadOutcome, STORAGE_KEY_PREFIX, SettingsStore};
