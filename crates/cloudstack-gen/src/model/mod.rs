//! The compiled object model.
//!
//! This model is produced by the schema compiler and consumed by renderers.
//! It describes API commands, their request parameters and their response
//! objects independently of any output language.

mod api;
mod container;
mod field;
mod object;
mod types;
mod variable;

pub use api::{Api, PAGE_PARAM, PAGE_SIZE_PARAM};
pub use container::{natural_cmp, VariableContainer};
pub use field::{Field, SharedObjectKey};
pub use object::{
    derive_class_name, response_fq_name, ucfirst, ObjectVariable, TypeIdentity,
    RESPONSE_NAMESPACE, SWAGGER_PREFIX,
};
pub use types::{
    is_collection_type, is_date_type, NormalizedType, COLLECTION_TYPES, DATE_TYPES, STRING_TYPES,
};
pub use variable::{split_related, Variable, DEFAULT_SINCE, DEFAULT_TYPE};
