//! Save/load of the mutable world state
//!
//! - `record`: the JSON save layout plus capture/restore against live state
//! - `store`: the file collaborator (`save_data/savegame.json`)
//! - `error`: what can go wrong, and which failures fall back to a new game

pub mod error;
pub mod record;
pub mod store;

pub use error::PersistenceError;
pub use record::{
    CoinRecord, EnvironmentRecord, MonsterRecord, PlatformRecord, PlayerRecord, SaveRecord,
    TreeRecord, capture, restore,
};
pub use store::{DEFAULT_SAVE_DIR, SAVE_FILE_NAME, SaveStore};
