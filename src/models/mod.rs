pub mod commodity;
pub mod price;
pub mod risk;

pub use commodity::*;
pub use price::*;
pub use risk::*;
