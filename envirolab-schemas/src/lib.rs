pub mod document;
pub mod file_formats;
pub mod kind;
pub mod parameter;
pub mod sample;
pub mod schema;
pub mod snapshot;
pub mod value;
