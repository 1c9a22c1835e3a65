pub mod id;
pub mod catalog;
pub mod cart;
pub mod favorite;

pub use id::*;
pub use catalog::*;
pub use cart::*;
pub use favorite::*;
