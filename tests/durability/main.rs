#[path = "../common/mod.rs"]
mod common;

mod atomicity;
mod backup_currency;
