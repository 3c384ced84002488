pub mod crpt;
pub mod traits;

pub use traits::DocumentTransport;
