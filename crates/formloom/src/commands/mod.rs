//! Command implementations for the formloom CLI
//!
//! Each command is a pure function from parsed input to a serializable
//! report; the handlers do the printing.

pub mod check;
pub mod fields;
pub mod io;
pub mod pages;
pub mod spam;
pub mod template;
