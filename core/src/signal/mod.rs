pub mod chirp;
pub mod echo;

pub use chirp::{generate_chirp, ChirpSpec};
pub use echo::{synthesize, EchoModel, Reflector};
