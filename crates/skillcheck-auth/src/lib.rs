//! skillcheck-auth — the authentication capability.
//!
//! The engine never reaches into ambient auth state; callers hold an
//! explicit `AuthProvider` object with a login/logout/current-user surface
//! and an explicit persistence boundary (`ProfileStore`). The assessment
//! engine's only touchpoint is `record_score`, called after scoring.

pub mod error;
pub mod mock;
pub mod store;
pub mod traits;

pub use error::AuthError;
pub use mock::MockAuth;
pub use store::ProfileStore;
pub use traits::{AuthProvider, User};
