// search-core/src/schema/mod.rs
//! 索引 Schema（search vector 投影）

mod builder;
mod fields;

pub use builder::{SchemaFields, build_schema};
pub use fields::*;
