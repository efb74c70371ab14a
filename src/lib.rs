pub mod dsa;

pub use dsa::bitset::{storage_words_needed,BitSetError,DynamicBitSet};
