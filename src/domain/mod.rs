// Domain layer: customer models, the factory and the ports adapters implement.

pub mod factory;
pub mod model;
pub mod ports;
