pub mod answer;
pub mod card;
pub mod interaction;
pub mod respondent;
pub mod store;

pub use store::{MemoryStore, PgStore, ResponseStore};
