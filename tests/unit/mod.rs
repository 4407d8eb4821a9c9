pub mod algorithm;
pub mod io;
