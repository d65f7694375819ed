pub mod card_service;
pub use card_service::{CardError, CardService, CardStats, ConfiguredFilter, CreatedCard};

pub mod card_service_impl;
pub use card_service_impl::SeaOrmCardService;

pub mod code_generator;
pub use code_generator::CodeGenerator;
