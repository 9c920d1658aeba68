mod arguments;
mod endpoint;
mod outcome;
mod tokens;

pub use arguments::*;
pub use endpoint::*;
pub use outcome::*;
pub use tokens::*;
