// Domain layer: core models and ports (interfaces). No dependencies on the
// concrete adapters or the CLI.

pub mod model;
pub mod ports;
