// Domain layer: core models and ports (interfaces). No knowledge of HTTP or the CLI.

pub mod model;
pub mod ports;
