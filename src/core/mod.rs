pub mod backup;
pub mod codes;
pub mod history;
pub mod log;
pub mod projector;
pub mod resolver;
pub mod sweeper;
