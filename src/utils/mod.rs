pub mod perft;
pub mod prng;

pub use perft::{perft, perft_divide};
pub use prng::PRNG;
