pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::app::build_engine;
pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::derangement::{draw_with_rng, generate_derangement, Draw, DrawStrategy};
pub use crate::core::sorteo::SorteoEngine;
pub use crate::domain::model::{Assignment, Delivery, DeliveryStatus, Participant, SorteoReport};
pub use crate::utils::error::{Result, SorteoError};
