pub mod decoder;
pub mod guard;
