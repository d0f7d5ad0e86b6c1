pub mod leverage_policy;
pub mod margin_calculator;
pub mod margin_validator;

pub use leverage_policy::*;
pub use margin_calculator::*;
pub use margin_validator::*;
