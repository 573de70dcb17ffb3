//! Entry screens: login and house setup

mod login;
mod setup;

pub use login::*;
pub use setup::*;
