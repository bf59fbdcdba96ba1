//! Pure helpers shared across layers

pub mod time_zones;
