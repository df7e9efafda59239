mod manager;
mod persistence;
mod record;

pub use manager::RecordStore;
pub use persistence::{load_policy, load_records, load_records_or_empty, save_records};
pub use record::{ProfileChange, UserRecord};
