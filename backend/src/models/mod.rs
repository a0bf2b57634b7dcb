pub mod inventory;
pub mod time;

pub use inventory::*;
pub use time::*;
