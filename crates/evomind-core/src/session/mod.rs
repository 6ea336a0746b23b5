//! Session bootstrap and explicit session state
//!
//! - [`SessionFlags`]: the two persisted flags read at startup
//! - [`SessionBootstrapResolver`]: picks the first screen from those flags
//! - [`SessionContext`]: the current user, passed explicitly to whoever needs it

mod context;
mod flags;
mod resolver;

pub use context::{SessionContext, SessionError};
pub use flags::SessionFlags;
pub use resolver::{Bootstrap, InitialRoute, SessionBootstrapResolver};
