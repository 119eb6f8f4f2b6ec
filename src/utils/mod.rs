pub mod sequences;

pub use sequences::{interval, uniform};
