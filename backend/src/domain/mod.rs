pub mod asset;
pub mod margin;
pub mod order;

pub use asset::*;
pub use margin::*;
pub use order::*;
