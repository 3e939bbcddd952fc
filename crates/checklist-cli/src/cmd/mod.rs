pub mod config;
pub mod export;
pub mod login;
pub mod reload;
pub mod save;
pub mod serve;
pub mod show;
pub mod status;
pub mod toggle;
pub mod uncheck;
