//! Get-or-create authentication by user name.

use std::sync::Arc;

use microblog_core::error::DomainError;
use microblog_core::log::{LogContext, Logger, USER_ID_KEY, attr};
use microblog_core::model::User;
use microblog_core::repository::UserRepository;

/// User-facing operations on the user store.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    logger: Arc<dyn Logger>,
}

impl UserService {
    /// Creates the service.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>, logger: Arc<dyn Logger>) -> Self {
        Self { users, logger }
    }

    /// Returns the user named `name`, registering it first if needed.
    ///
    /// Two concurrent calls for a new name both return the same user: the
    /// call that loses the registration race reads the winner back.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a blank name, or any store error.
    pub fn authenticate(&self, ctx: &LogContext, name: &str) -> Result<User, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("name must not be blank".into()));
        }

        if let Some(user) = self.users.get_user_by_name(name)? {
            return Ok(user);
        }

        match self.users.create_user(name) {
            Ok(user) => {
                self.logger.info_ctx(
                    &ctx.with_user(user.id),
                    "user registered",
                    vec![attr("name", name), attr(USER_ID_KEY, user.id)],
                );
                Ok(user)
            }
            Err(DomainError::UserAlreadyExists(_)) => self
                .users
                .get_user_by_name(name)?
                .ok_or_else(|| DomainError::UserNameNotFound(name.to_owned())),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use microblog_core::id::IdGenerator;
    use microblog_store::InMemoryUserStore;
    use microblog_test_support::{FailingUserRepository, RecordingLogger, SequentialIdGenerator};
    use uuid::Uuid;

    fn service() -> (UserService, Arc<InMemoryUserStore>, Arc<RecordingLogger>) {
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIdGenerator::new());
        let store = Arc::new(InMemoryUserStore::new(ids));
        let logger = Arc::new(RecordingLogger::new());
        (
            UserService::new(store.clone(), logger.clone()),
            store,
            logger,
        )
    }

    /// Reports a miss on the first lookup, as if another request registered
    /// the name between the lookup and the create.
    struct RacingUserRepository {
        inner: InMemoryUserStore,
        missed: parking_lot::Mutex<bool>,
    }

    impl UserRepository for RacingUserRepository {
        fn create_user(&self, name: &str) -> Result<User, DomainError> {
            self.inner.create_user(name)
        }

        fn get_user_by_name(&self, name: &str) -> Result<Option<User>, DomainError> {
            let mut missed = self.missed.lock();
            if !*missed {
                *missed = true;
                return Ok(None);
            }
            self.inner.get_user_by_name(name)
        }

        fn get_user_by_id(&self, id: Uuid) -> Result<User, DomainError> {
            self.inner.get_user_by_id(id)
        }
    }

    #[test]
    fn test_authenticate_registers_new_user() {
        // Arrange
        let (service, store, logger) = service();

        // Act
        let user = service
            .authenticate(&LogContext::default(), "vova")
            .unwrap();

        // Assert
        assert_eq!(user.name, "vova");
        assert_eq!(user.id, SequentialIdGenerator::nth(1));
        assert_eq!(store.len(), 1);
        let records = logger.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "user registered");
        assert_eq!(records[0].context.user_id, Some(user.id));
    }

    #[test]
    fn test_authenticate_returns_existing_user() {
        // Arrange
        let (service, store, logger) = service();
        let existing = store.create_user("vova").unwrap();

        // Act
        let user = service
            .authenticate(&LogContext::default(), "vova")
            .unwrap();

        // Assert
        assert_eq!(user, existing);
        assert_eq!(store.len(), 1);
        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_authenticate_rejects_blank_name() {
        let (service, store, _logger) = service();

        let result = service.authenticate(&LogContext::default(), "   ");

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_authenticate_reads_back_after_losing_registration_race() {
        // Arrange
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIdGenerator::new());
        let inner = InMemoryUserStore::new(ids);
        let winner = inner.create_user("bob").unwrap();
        let repo = RacingUserRepository {
            inner,
            missed: parking_lot::Mutex::new(false),
        };
        let service = UserService::new(Arc::new(repo), Arc::new(RecordingLogger::new()));

        // Act
        let user = service.authenticate(&LogContext::default(), "bob").unwrap();

        // Assert
        assert_eq!(user, winner);
    }

    #[test]
    fn test_authenticate_propagates_store_failure() {
        let service = UserService::new(
            Arc::new(FailingUserRepository),
            Arc::new(RecordingLogger::new()),
        );

        let result = service.authenticate(&LogContext::default(), "vova");

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
