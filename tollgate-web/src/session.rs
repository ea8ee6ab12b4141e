//! Cookie-keyed session store
//!
//! Sessions are only created once there is something to keep, so anonymous
//! requests never get a cookie. A request that leaves its session untouched
//! writes nothing back, so it cannot undo a concurrent login or logout on the
//! same cookie.

use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tollgate_security::{SessionHandle, AUTH_TOKEN_ATTRIBUTE};
use tracing::debug;
use uuid::Uuid;

type Attributes = HashMap<String, String>;

/// Session loaded for one request
#[derive(Debug, Clone, Default)]
pub struct HttpSession {
    id: Option<String>,
    attributes: Attributes,
    invalidated: bool,
    /// Set once the request changes the session
    dirty: bool,
}

impl HttpSession {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

impl SessionHandle for HttpSession {
    fn token(&self) -> Option<String> {
        self.attributes.get(AUTH_TOKEN_ATTRIBUTE).cloned()
    }

    fn set_token(&mut self, token: &str) {
        self.attributes
            .insert(AUTH_TOKEN_ATTRIBUTE.to_string(), token.to_string());
        self.dirty = true;
    }

    fn invalidate(&mut self) {
        self.attributes.clear();
        self.invalidated = true;
        self.dirty = true;
    }
}

/// What the response has to do with the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCookie {
    Keep,
    Set(String),
    Expire,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Attributes>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown or missing ids yield a fresh, unsaved session
    pub fn load(&self, id: Option<&str>) -> HttpSession {
        id.and_then(|id| {
            self.sessions.get(id).map(|attributes| HttpSession {
                id: Some(id.to_string()),
                attributes: attributes.value().clone(),
                invalidated: false,
                dirty: false,
            })
        })
        .unwrap_or_default()
    }

    /// Write back a session the request changed; clean sessions are left alone
    pub fn save(&self, session: HttpSession) -> SessionCookie {
        if !session.dirty {
            return SessionCookie::Keep;
        }

        if session.invalidated {
            return match session.id {
                Some(id) => {
                    self.sessions.remove(&id);
                    debug!("Invalidated session");
                    SessionCookie::Expire
                }
                None => SessionCookie::Keep,
            };
        }

        match session.id {
            Some(id) => {
                self.sessions.insert(id, session.attributes);
                SessionCookie::Keep
            }
            None => {
                let id = Uuid::new_v4().simple().to_string();
                self.sessions.insert(id.clone(), session.attributes);
                debug!("Created session");
                SessionCookie::Set(id)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_is_not_stored() {
        let store = SessionStore::new();
        let session = store.load(None);
        assert_eq!(session.token(), None);
        assert_eq!(store.save(session), SessionCookie::Keep);
        assert!(store.is_empty());
    }

    #[test]
    fn test_new_token_creates_session() {
        let store = SessionStore::new();
        let mut session = store.load(Some("forged"));
        assert!(session.id().is_none());

        session.set_token("t1");
        let SessionCookie::Set(id) = store.save(session) else {
            panic!("expected a new cookie");
        };

        let reloaded = store.load(Some(&id));
        assert_eq!(reloaded.token().as_deref(), Some("t1"));
        assert_eq!(reloaded.attribute(AUTH_TOKEN_ATTRIBUTE), Some("t1"));
    }

    #[test]
    fn test_existing_session_is_updated_in_place() {
        let store = SessionStore::new();
        let mut session = store.load(None);
        session.set_token("t1");
        let SessionCookie::Set(id) = store.save(session) else {
            panic!("expected a new cookie");
        };

        let mut session = store.load(Some(&id));
        session.set_token("t2");
        assert_eq!(store.save(session), SessionCookie::Keep);
        assert_eq!(store.load(Some(&id)).token().as_deref(), Some("t2"));
        assert_eq!(store.len(), 1);
    }

    fn stored_session(store: &SessionStore, token: &str) -> String {
        let mut session = store.load(None);
        session.set_token(token);
        match store.save(session) {
            SessionCookie::Set(id) => id,
            other => panic!("expected a new cookie, got {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_session_does_not_overwrite_concurrent_login() {
        let store = SessionStore::new();
        let id = stored_session(&store, "t1");

        let reader = store.load(Some(&id));
        let mut login = store.load(Some(&id));
        login.set_token("t2");

        assert_eq!(store.save(login), SessionCookie::Keep);
        assert!(!reader.is_dirty());
        assert_eq!(store.save(reader), SessionCookie::Keep);
        assert_eq!(store.load(Some(&id)).token().as_deref(), Some("t2"));
    }

    #[test]
    fn test_unchanged_session_does_not_restore_concurrent_logout() {
        let store = SessionStore::new();
        let id = stored_session(&store, "t1");

        let reader = store.load(Some(&id));
        let mut logout = store.load(Some(&id));
        logout.invalidate();

        assert_eq!(store.save(logout), SessionCookie::Expire);
        assert_eq!(store.save(reader), SessionCookie::Keep);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalidate_removes_session() {
        let store = SessionStore::new();
        let mut session = store.load(None);
        session.set_token("t1");
        let SessionCookie::Set(id) = store.save(session) else {
            panic!("expected a new cookie");
        };

        let mut session = store.load(Some(&id));
        session.invalidate();
        assert_eq!(store.save(session), SessionCookie::Expire);
        assert!(store.is_empty());
        assert!(store.load(Some(&id)).token().is_none());
    }
}
