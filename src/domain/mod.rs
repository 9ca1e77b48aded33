// Domain layer: provisioning models and ports (interfaces) for the chain-facing collaborators.

pub mod model;
pub mod ports;
