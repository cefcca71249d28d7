//! Test helpers shared across crates.
//!
//! - [`jail`] runs a closure inside a [`figment::Jail`] (a scratch working
//!   directory plus environment isolation) and writes resource files into it.
//! - [`resources`] builds scratch resource directories for tests that do not
//!   need the jail's global lock.

pub mod jail;
pub mod resources;
