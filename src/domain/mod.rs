// Domain layer: the tabular input, parsed header paths, output records and the
// ports implemented by the adapters.

pub mod model;
pub mod ports;
