pub mod export;
pub mod seed;
