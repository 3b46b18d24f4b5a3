#![deny(unsafe_code)]

pub mod control;
pub mod error;
pub mod mapping;
pub mod row;
pub mod schema;
pub mod table;

pub use control::Control;
pub use error::{ModelError, Result};
pub use mapping::FieldMapping;
pub use row::{ImportResult, ImportRow};
pub use schema::{
    Criticality, FieldKey, FieldRule, TargetField, field_for, required_fields, target_fields,
};
pub use table::{Delimiter, RawTable};
