pub mod colors;
pub mod grid;
pub mod logging;
pub mod print;
