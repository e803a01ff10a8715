// ABOUTME: Recursive resolvers that render templates embedded in nested data
// ABOUTME: Mapping resolution builds new maps, object resolution mutates in place

pub mod error;
pub mod mapping;
pub mod object;

pub use error::PropertyError;
pub use mapping::{resolve_mapping, resolve_value};
pub use object::{
    resolve_object, resolve_object_reporting, Property, Resolvable, ResolveReport,
    SkippedProperty,
};
