pub mod author;
pub mod chapter;
pub mod deck;
pub mod resource;

pub use author::*;
pub use chapter::*;
pub use deck::*;
pub use resource::*;
