#![deny(unsafe_code)]

pub mod engine;
pub mod patterns;
pub mod repository;

pub use engine::{auto_map_fields, normalize_text};
pub use patterns::synonyms_for;
pub use repository::{
    FileCache, InMemoryCache, MappingCache, MappingStore, StoredMapping, mapping_signature,
};
