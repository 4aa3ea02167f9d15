//! Auth-domain credential wrapper, attachment policy, and login validation.

pub mod login;
pub mod policy;
pub mod secret;

pub use login::*;
pub use policy::*;
pub use secret::*;
