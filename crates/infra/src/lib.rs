//! Infrastructure layer: record stores, the inventory service, config.

pub mod beer_service;
pub mod config;
pub mod repository;

pub use beer_service::{BeerService, ServiceError, ServiceResult};
pub use config::{AppConfig, ConfigError, StoreConfig};
pub use repository::{BeerRepository, InMemoryBeerRepository, PostgresBeerRepository, RepositoryError};
