pub mod cancel;
pub mod constant;
pub mod error;
pub mod remote;
pub mod state;

pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::error::*;
    pub use crate::remote::*;
    pub use crate::state::*;
}
