pub mod exit_type;
pub mod gym;
pub mod record;
pub mod source;
pub mod status;
pub mod today;
