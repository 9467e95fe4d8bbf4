mod date;
mod error;
mod generator;
mod key;
mod mask;
mod rand;
mod random_native;
#[cfg(feature = "serde")]
mod serde;
mod text;

pub use crate::date::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::key::*;
pub use crate::rand::*;
pub use crate::random_native::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::text::*;
