//! User store keyed by unique name.

use std::collections::HashMap;
use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::id::IdGenerator;
use microblog_core::model::User;
use microblog_core::repository::UserRepository;
use parking_lot::RwLock;
use uuid::Uuid;

/// Users indexed by name. Lookups by id scan the map.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    ids: Arc<dyn IdGenerator>,
}

impl InMemoryUserStore {
    /// Creates an empty store minting ids from `ids`.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            ids,
        }
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns `true` if no user is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserRepository for InMemoryUserStore {
    fn create_user(&self, name: &str) -> Result<User, DomainError> {
        let mut users = self.users.write();
        if users.contains_key(name) {
            return Err(DomainError::UserAlreadyExists(name.to_owned()));
        }

        let user = User {
            id: self.ids.next_id(),
            name: name.to_owned(),
        };
        users.insert(user.name.clone(), user.clone());
        Ok(user)
    }

    fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().get(name).cloned())
    }

    fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .read()
            .values()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(DomainError::UserNotFound(id))
    }
}
