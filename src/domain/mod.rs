//! Domain layer: entities, value objects and the ports the core depends on.

pub mod account;
pub mod cart;
pub mod ids;
pub mod item;
pub mod money;
pub mod order;
pub mod ports;
