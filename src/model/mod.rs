pub mod bands;
pub mod records;
pub mod scores;
pub mod signals;
pub mod weights;
