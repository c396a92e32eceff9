//! In-memory port doubles shared by unit tests (in `src/`) and integration
//! tests (in `tests/`).
//!
//! Compiled for `cfg(test)` and behind the `test-support` feature. The doubles
//! keep the same contracts as the Diesel and bcrypt adapters: email
//! uniqueness is enforced at insert time, reads hide expired snippets and
//! identifiers start at one.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    NewSnippetRecord, NewUserRecord, PasswordHash, PasswordHashError, PasswordHasher,
    SnippetPersistenceError, SnippetRepository, StoredCredentials, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Snippet, SnippetId, SnippetLifecycleService, UserAccountService, UserId};
use crate::inbound::http::state::HttpState;

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    mutex
        .lock()
        .map_err(|_| "in-memory store lock poisoned".to_owned())
}

/// Snippet store backed by a vector.
#[derive(Debug, Default)]
pub struct InMemorySnippetRepository {
    rows: Mutex<Vec<Snippet>>,
}

impl InMemorySnippetRepository {
    /// Number of stored snippets, expired ones included.
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
    }

    /// Whether nothing has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn insert(
        &self,
        record: NewSnippetRecord,
    ) -> Result<SnippetId, SnippetPersistenceError> {
        let mut rows = lock(&self.rows).map_err(SnippetPersistenceError::query)?;
        let next = i64::try_from(rows.len() + 1)
            .map_err(|err| SnippetPersistenceError::query(err.to_string()))?;
        let id = SnippetId::new(next)
            .map_err(|err| SnippetPersistenceError::query(err.to_string()))?;
        rows.push(Snippet {
            id,
            title: record.title,
            content: record.content,
            created: record.created,
            expires: record.expires,
        });
        Ok(id)
    }

    async fn find_active(
        &self,
        id: SnippetId,
        now: DateTime<Utc>,
    ) -> Result<Option<Snippet>, SnippetPersistenceError> {
        let rows = lock(&self.rows).map_err(SnippetPersistenceError::query)?;
        Ok(rows
            .iter()
            .find(|snippet| snippet.id == id && snippet.is_active_at(now))
            .cloned())
    }

    async fn latest_active(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Snippet>, SnippetPersistenceError> {
        let rows = lock(&self.rows).map_err(SnippetPersistenceError::query)?;
        Ok(rows
            .iter()
            .rev()
            .filter(|snippet| snippet.is_active_at(now))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[derive(Debug)]
struct UserRow {
    id: UserId,
    email: String,
    hashed_password: PasswordHash,
}

/// User store enforcing unique emails under a single lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<UserRow>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, record: NewUserRecord) -> Result<UserId, UserPersistenceError> {
        let mut rows = lock(&self.rows).map_err(UserPersistenceError::query)?;
        if rows.iter().any(|row| row.email == record.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        let next = i64::try_from(rows.len() + 1)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        rows.push(UserRow {
            id,
            email: record.email,
            hashed_password: record.hashed_password,
        });
        Ok(id)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let rows = lock(&self.rows).map_err(UserPersistenceError::query)?;
        Ok(rows
            .iter()
            .find(|row| row.email == email)
            .map(|row| StoredCredentials {
                id: row.id,
                hashed_password: row.hashed_password.clone(),
            }))
    }

    async fn exists(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let rows = lock(&self.rows).map_err(UserPersistenceError::query)?;
        Ok(rows.iter().any(|row| row.id == id))
    }
}

/// Reversible stand-in for bcrypt so tests stay fast.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

const PLAINTEXT_PREFIX: &str = "plain$";

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PLAINTEXT_PREFIX}{password}")))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let stored = hash
            .as_str()
            .strip_prefix(PLAINTEXT_PREFIX)
            .ok_or_else(|| PasswordHashError::verify("hash was not produced by this hasher"))?;
        Ok(stored == password)
    }
}

/// Clock whose time only moves when told to.
#[derive(Debug)]
pub struct MutableClock {
    now: Mutex<DateTime<Utc>>,
}

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Start at 2024-01-01T12:00:00Z.
    pub fn fixed() -> Self {
        Self::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += delta;
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Handles onto the doubles behind an in-memory [`HttpState`].
pub struct InMemoryApp {
    /// State to hand to the HTTP handlers.
    pub state: HttpState,
    /// Snippet store shared with `state`.
    pub snippets: Arc<InMemorySnippetRepository>,
    /// User store shared with `state`.
    pub users: Arc<InMemoryUserRepository>,
    /// Clock shared with `state`.
    pub clock: Arc<MutableClock>,
}

impl InMemoryApp {
    /// Wire the real domain services over in-memory ports.
    pub fn new() -> Self {
        let snippets = Arc::new(InMemorySnippetRepository::default());
        let users = Arc::new(InMemoryUserRepository::default());
        let clock = Arc::new(MutableClock::fixed());
        let state = HttpState::new(
            Arc::new(SnippetLifecycleService::new(
                Arc::clone(&snippets),
                Arc::clone(&clock) as Arc<dyn Clock>,
            )),
            Arc::new(UserAccountService::new(
                Arc::clone(&users),
                Arc::new(PlaintextPasswordHasher),
            )),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        Self {
            state,
            snippets,
            users,
            clock,
        }
    }
}

impl Default for InMemoryApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(email: &str) -> NewUserRecord {
        NewUserRecord {
            name: "Alice".into(),
            email: email.into(),
            hashed_password: PasswordHash::new("plain$pa55word"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn user_store_rejects_second_insert_of_an_email() {
        let users = InMemoryUserRepository::default();
        let first = users.insert(record("a@example.com")).await.expect("first");
        let second = users.insert(record("a@example.com")).await;

        assert_eq!(first.get(), 1);
        assert!(matches!(second, Err(UserPersistenceError::DuplicateEmail)));
    }

    #[rstest]
    #[tokio::test]
    async fn snippet_store_hides_expired_rows() {
        let clock = MutableClock::fixed();
        let repo = InMemorySnippetRepository::default();
        let now = clock.utc();
        let id = repo
            .insert(NewSnippetRecord {
                title: "t".into(),
                content: "c".into(),
                created: now,
                expires: now + TimeDelta::days(1),
            })
            .await
            .expect("insert");

        clock.advance(TimeDelta::days(2));

        assert!(repo.find_active(id, clock.utc()).await.expect("read").is_none());
        assert!(repo.latest_active(clock.utc(), 10).await.expect("read").is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn plaintext_hasher_verifies_its_own_output() {
        let hasher = PlaintextPasswordHasher;
        let hash = hasher.hash("pa55word").await.expect("hash");

        assert!(hasher.verify("pa55word", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrong", &hash).await.expect("verify"));
    }
}
