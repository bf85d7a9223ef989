pub mod inspect;
mod input;
pub mod merge;
