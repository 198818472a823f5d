pub mod main;
pub mod media_properties;
pub mod products;
pub mod tags;
