// packed bit storage
pub mod bitset;
