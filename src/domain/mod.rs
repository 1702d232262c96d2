// Domain layer: core models, the service enumeration and ports (interfaces).

pub mod model;
pub mod ports;
pub mod services;
