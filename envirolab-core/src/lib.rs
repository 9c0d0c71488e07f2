pub mod catalog;
pub mod clock;
pub mod error;
pub mod form;
pub mod projector;
pub mod sample;
