//! Solution decoding and loading checks.

mod decoder;
mod loading;

pub use decoder::SolutionDecoder;
pub use loading::check_loading;
