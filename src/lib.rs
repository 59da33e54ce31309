#![warn(clippy::all)]
#![doc = include_str!("../README.md")]

// Modules that make up the SQL Admin library.
mod args;
mod engine;
mod error;
mod layout;
mod results;
mod schema;
mod sqls;
mod traits;

// Publicly expose the contents of these modules.
pub use self::{
    // add to lib
    args::Arguments,
    engine::*,
    error::*,
    layout::*,
    results::*,
    schema::*,
    sqls::*,
    traits::*,
};
