pub mod lookup;
pub mod product;

pub use lookup::*;
pub use product::*;
