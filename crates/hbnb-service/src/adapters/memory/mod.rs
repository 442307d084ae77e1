//! In-Memory Repository Implementation
//!
//! Non-persistent storage for tests and the `memory` storage backend.

mod repository;

pub use repository::InMemoryRepository;
