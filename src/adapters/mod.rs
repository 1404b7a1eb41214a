// Adapters layer: persisted record shape and the store-independent repository.
// Store-specific repositories (file, DynamoDB) sit next to their config under src/config.

pub mod memory;
pub mod record;
