pub mod combos;
pub mod plan;
pub mod stats;
