pub mod card;

pub use card::{Card, CardConfig, CardLink, CardStatus};
