pub mod backup;
pub mod checkin;
pub mod checkout;
pub mod config;
pub mod db;
pub mod export;
pub mod gym;
pub mod history;
pub mod init;
pub mod kiosk;
pub mod log;
pub mod status;
pub mod sweep;
