#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    InMemoryRepository, SessionRecordId, SessionRecordRepository, SessionTotals, Storage,
    StorageError,
};
