// Domain layer: records, ports, and the pure functions over them.

pub mod model;
pub mod ports;

pub mod services;
