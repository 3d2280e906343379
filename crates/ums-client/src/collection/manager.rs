use std::collections::HashSet;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::Rng;
use ums_model::{NewUser, User, UserId, UserPatch};

use super::activity::{Activity, InFlight};
use super::filter::search;
use super::page::{PageDescriptor, PageOutcome, PageStep, normalized_total_pages};
use crate::{
    error::{CollectionError, CollectionKind},
    notify::Notification,
    remote::UsersRemote,
    validation::{ValidationError, validate_new_user, validate_patch},
};

/// Ids handed to created users when the server does not echo a usable one.
///
/// Well above anything the API assigns, so they never shadow a listed user.
pub const SYNTHETIC_ID_RANGE: Range<UserId> = 1_000_000..10_000_000;

/// Point-in-time view of the collections
#[derive(Debug, Clone, Default)]
pub struct CollectionSnapshot {
    pub active: Arc<Vec<User>>,
    pub trash: Arc<Vec<User>>,
    pub page: PageDescriptor,
    pub search_term: String,
}

impl CollectionSnapshot {
    fn contains(&self, id: UserId) -> bool {
        self.active.iter().chain(self.trash.iter()).any(|u| u.id == id)
    }
}

/// Keeps the active users, the trash and the page in sync with the remote API.
///
/// Every method takes `&self`; share the manager behind an [`Arc`] to run
/// operations concurrently. Results apply in the order responses arrive.
/// Collections are swapped wholesale, so a [`snapshot`](Self::snapshot) never
/// shows a half-applied change.
#[derive(Debug)]
pub struct UserCollectionManager<R> {
    remote: R,
    state: RwLock<CollectionSnapshot>,
    notifications: Mutex<Vec<Notification>>,
    in_flight: InFlight,
    closed: AtomicBool,
}

impl<R: UsersRemote> UserCollectionManager<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            state: RwLock::new(CollectionSnapshot::default()),
            notifications: Mutex::new(Vec::new()),
            in_flight: InFlight::default(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Fetch `page` and make it the active set.
    ///
    /// On failure the active set and page descriptor stay as they were.
    pub async fn load(&self, page: u32) -> Result<PageDescriptor, CollectionError> {
        self.ensure_open()?;
        if page == 0 {
            return Err(ValidationError::new("Page must be at least 1").into());
        }

        let result = {
            let _guard = self.in_flight.enter(Activity::Loading);
            let result = self.remote.list_users(page).await;
            self.in_flight.first_load_settled();
            result
        };
        self.ensure_open()?;

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(page, error = %err, "Failed to fetch users");
                self.notify(Notification::error("Failed to fetch users"));
                return Err(err.into());
            }
        };

        let total_pages = normalized_total_pages(response.total_pages);
        if page > total_pages {
            tracing::warn!(page, total_pages, "Requested page is past the end");
            self.notify(Notification::error("Failed to fetch users"));
            return Err(CollectionError::PageOutOfRange { page, total_pages });
        }

        let descriptor = PageDescriptor::from_response(page, &response);
        let mut state = self.write_state();

        let trashed: HashSet<UserId> = state.trash.iter().map(|u| u.id).collect();
        let mut seen = HashSet::new();
        let active: Vec<User> = response
            .data
            .into_iter()
            .filter(|user| !trashed.contains(&user.id) && seen.insert(user.id))
            .collect();

        tracing::debug!(page, count = active.len(), total_pages, "Loaded users");
        state.active = Arc::new(active);
        state.page = descriptor;

        Ok(descriptor)
    }

    /// Move one page back or forward.
    ///
    /// At either end this is a no-op and nothing is fetched.
    pub async fn paginate(&self, step: PageStep) -> Result<PageOutcome, CollectionError> {
        self.ensure_open()?;

        let page = self.page();
        let target = page.step_target(step);
        if target == page.current {
            return Ok(PageOutcome::Unchanged);
        }

        self.load(target).await?;
        Ok(PageOutcome::Loaded(target))
    }

    /// Submit a new user and prepend it to the active set
    pub async fn create(&self, draft: NewUser) -> Result<User, CollectionError> {
        self.ensure_open()?;
        validate_new_user(&draft)?;

        let result = {
            let _guard = self.in_flight.enter(Activity::Creating);
            self.remote.create_user(&draft).await
        };
        self.ensure_open()?;

        let created = match result {
            Ok(created) => created,
            Err(err) => {
                tracing::error!(email = %draft.email, error = %err, "Failed to add user");
                self.notify(Notification::error("Failed to add user"));
                return Err(err.into());
            }
        };

        let user = {
            let mut state = self.write_state();
            let id = created
                .numeric_id()
                .filter(|id| !state.contains(*id))
                .unwrap_or_else(|| synthesize_id(&state));

            let user = User::from_draft(id, draft);
            let mut active = Vec::with_capacity(state.active.len() + 1);
            active.push(user.clone());
            active.extend(state.active.iter().cloned());
            state.active = Arc::new(active);
            user
        };

        tracing::info!(id = user.id, "User added");
        self.notify(Notification::success("User added successfully"));
        Ok(user)
    }

    /// Update the supplied fields of an active user in place
    pub async fn edit(&self, id: UserId, patch: UserPatch) -> Result<User, CollectionError> {
        self.ensure_open()?;
        validate_patch(&patch)?;
        self.require_present(id, CollectionKind::Active)?;

        let result = {
            let _guard = self.in_flight.enter(Activity::Editing);
            self.remote.update_user(id, &patch).await
        };
        self.ensure_open()?;

        if let Err(err) = result {
            tracing::error!(id, error = %err, "Failed to update user");
            self.notify(Notification::error("Failed to update user"));
            return Err(err.into());
        }

        let user = {
            let mut state = self.write_state();
            let Some(position) = state.active.iter().position(|u| u.id == id) else {
                drop(state);
                return Err(self.not_found(id, CollectionKind::Active));
            };

            let mut active = state.active.as_ref().clone();
            patch.apply_to(&mut active[position]);
            let user = active[position].clone();
            state.active = Arc::new(active);
            user
        };

        tracing::info!(id, "User updated");
        self.notify(Notification::success("User updated successfully"));
        Ok(user)
    }

    /// Delete a user remotely and move it to the trash
    pub async fn delete(&self, id: UserId) -> Result<User, CollectionError> {
        self.ensure_open()?;
        self.require_present(id, CollectionKind::Active)?;

        let result = {
            let _guard = self.in_flight.enter(Activity::Deleting);
            self.remote.delete_user(id).await
        };
        self.ensure_open()?;

        if let Err(err) = result {
            tracing::error!(id, error = %err, "Failed to delete user");
            self.notify(Notification::error("Failed to delete user"));
            return Err(err.into());
        }

        let user = {
            let mut state = self.write_state();
            let Some(position) = state.active.iter().position(|u| u.id == id) else {
                drop(state);
                return Err(self.not_found(id, CollectionKind::Active));
            };

            let mut active = state.active.as_ref().clone();
            let user = active.remove(position);
            let mut trash = state.trash.as_ref().clone();
            trash.push(user.clone());

            state.active = Arc::new(active);
            state.trash = Arc::new(trash);
            user
        };

        tracing::info!(id, "User moved to trash");
        self.notify(Notification::success("User moved to trash"));
        Ok(user)
    }

    /// Move a trashed user back to the end of the active set. Local only.
    pub fn restore(&self, id: UserId) -> Result<User, CollectionError> {
        self.ensure_open()?;

        let user = {
            let mut state = self.write_state();
            let Some(position) = state.trash.iter().position(|u| u.id == id) else {
                drop(state);
                return Err(self.not_found(id, CollectionKind::Trash));
            };

            let mut trash = state.trash.as_ref().clone();
            let user = trash.remove(position);
            let mut active = state.active.as_ref().clone();
            active.push(user.clone());

            state.active = Arc::new(active);
            state.trash = Arc::new(trash);
            user
        };

        tracing::info!(id, "User restored");
        self.notify(Notification::success("User restored successfully"));
        Ok(user)
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.write_state().search_term = term.into();
    }

    pub fn search_term(&self) -> String {
        self.read_state().search_term.clone()
    }

    /// Active users matching the current search term
    pub fn visible_users(&self) -> Vec<User> {
        let state = self.read_state();
        search(&state.active, &state.search_term)
    }

    /// Pagination controls are hidden while a search is active
    pub fn pagination_visible(&self) -> bool {
        self.read_state().search_term.is_empty()
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.read_state().clone()
    }

    pub fn active(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.read_state().active)
    }

    pub fn trash(&self) -> Arc<Vec<User>> {
        Arc::clone(&self.read_state().trash)
    }

    pub fn page(&self) -> PageDescriptor {
        self.read_state().page
    }

    pub fn is_in_flight(&self, activity: Activity) -> bool {
        self.in_flight.is_active(activity)
    }

    /// Drain pending notifications, oldest first
    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(
            &mut *self
                .notifications
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// End the session. Results still in flight are discarded.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("User collection closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), CollectionError> {
        if self.is_closed() {
            return Err(CollectionError::Closed);
        }
        Ok(())
    }

    fn require_present(&self, id: UserId, set: CollectionKind) -> Result<(), CollectionError> {
        let present = {
            let state = self.read_state();
            let users = match set {
                CollectionKind::Active => &state.active,
                CollectionKind::Trash => &state.trash,
            };
            users.iter().any(|u| u.id == id)
        };

        if present {
            Ok(())
        } else {
            Err(self.not_found(id, set))
        }
    }

    fn not_found(&self, id: UserId, set: CollectionKind) -> CollectionError {
        tracing::warn!(id, %set, "User not found, ignoring");
        CollectionError::NotFound { id, set }
    }

    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CollectionSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CollectionSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Random id from [`SYNTHETIC_ID_RANGE`] not used by either collection
fn synthesize_id(state: &CollectionSnapshot) -> UserId {
    let mut rng = rand::thread_rng();
    loop {
        let id = rng.gen_range(SYNTHETIC_ID_RANGE);
        if !state.contains(id) {
            return id;
        }
    }
}
