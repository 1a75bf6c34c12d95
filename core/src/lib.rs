#![no_std]

extern crate alloc;

pub use card::*;
pub use deck::*;
pub use error::*;
pub use grid::*;
pub use types::*;
pub use win::*;

mod card;
mod deck;
mod error;
mod grid;
mod types;
mod win;
