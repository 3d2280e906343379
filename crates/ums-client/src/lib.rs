//! Client side of the user management app.
//!
//! [`UserCollectionManager`] keeps the list of active users, the trash of
//! soft-deleted ones and the current page, and talks to the remote API through
//! the [`UsersRemote`] trait. [`AuthSession`] handles login, registration and
//! the stored bearer token.

pub mod collection;
pub mod config;
pub mod error;
pub mod notify;
pub mod remote;
pub mod session;
pub mod validation;

pub use collection::{
    Activity, CollectionSnapshot, PageDescriptor, PageOutcome, PageStep, UserCollectionManager,
    search,
};
pub use config::ClientConfig;
pub use error::{CollectionError, CollectionKind, RemoteError, SessionError, StoreError};
pub use notify::{Notification, NotificationLevel};
pub use remote::{AuthRemote, HttpRemote, UsersRemote};
pub use session::{
    AuthSession, FileTokenStore, MemoryTokenStore, RegistrationForm, TOKEN_KEY, TokenStore,
};
pub use validation::ValidationError;
