//! Authorization for parakeet.
//!
//! Access is decided by static set membership derived once from
//! configuration at startup; there is no external authorization service
//! and no runtime mutation.

mod registry;

pub use registry::AuthzRegistry;
