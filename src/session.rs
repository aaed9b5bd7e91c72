//! Session identity, mirrored into the key/value store so a restart picks
//! the signed-in user back up. No real authentication: one development
//! credential pair is accepted.

use crate::store::{KeyValueStore, StoreError};
use crate::types::Identity;

const SESSION_KEY: &str = "impacts_auth_user";

const DEV_LOGIN: &str = "Admin";
const DEV_PASSWORD: &str = "test123";

/// Checks the credential pair. On success the identity is persisted under the
/// session mirror key and returned; on failure the session is left untouched
/// and `None` is returned (wrong credentials are not an error).
pub fn login(
    kv: &mut impl KeyValueStore,
    identifier: &str,
    secret: &str,
) -> Result<Option<Identity>, StoreError> {
    if identifier != DEV_LOGIN || secret != DEV_PASSWORD {
        return Ok(None);
    }

    let identity = Identity {
        name: "Admin".to_string(),
        email: "admin@impacts.org".to_string(),
        role: "admin".to_string(),
    };
    kv.set(SESSION_KEY, &serde_json::to_string(&identity)?)?;
    Ok(Some(identity))
}

/// Clears the session mirror. Safe to call with no session active.
pub fn logout(kv: &mut impl KeyValueStore) -> Result<(), StoreError> {
    kv.remove(SESSION_KEY)
}

/// The signed-in user, if any. An unparseable mirror entry counts as no
/// session rather than an error.
pub fn current_user(kv: &impl KeyValueStore) -> Option<Identity> {
    let raw = kv.get(SESSION_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::warn!("session mirror is unreadable, treating as signed out: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn login_with_dev_credentials_establishes_a_session() {
        let mut kv = MemoryStore::new();
        let identity = login(&mut kv, "Admin", "test123").unwrap().unwrap();
        assert_eq!(identity.email, "admin@impacts.org");
        assert_eq!(current_user(&kv), Some(identity));
    }

    #[test]
    fn wrong_credentials_leave_no_session() {
        let mut kv = MemoryStore::new();
        assert!(login(&mut kv, "Admin", "nope").unwrap().is_none());
        assert!(login(&mut kv, "admin", "test123").unwrap().is_none());
        assert!(current_user(&kv).is_none());
    }

    #[test]
    fn logout_is_idempotent() {
        let mut kv = MemoryStore::new();
        login(&mut kv, "Admin", "test123").unwrap();
        logout(&mut kv).unwrap();
        logout(&mut kv).unwrap();
        assert!(current_user(&kv).is_none());
    }

    #[test]
    fn corrupt_mirror_reads_as_signed_out() {
        let mut kv = MemoryStore::new();
        kv.set(SESSION_KEY, "{{{").unwrap();
        assert!(current_user(&kv).is_none());
    }
}
