// Adapters layer: the I/O collaborators around the core (source dispatch,
// HTTP download, CSV decoding, JSON rendering).

pub mod http;
pub mod json;
pub mod source;
pub mod tabular;
