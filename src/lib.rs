pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::Store;
pub use models::card::{Card, CardConfig, CardLink, CardStatus};
pub use services::{CardError, CardService, SeaOrmCardService};
