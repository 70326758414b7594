mod not_found;
mod post;
mod preamble;

pub mod share;

pub use not_found::*;
pub use post::*;
pub use preamble::*;
