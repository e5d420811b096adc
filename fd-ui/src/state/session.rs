//! Browser Session
//!
//! Wraps the core [`SessionStore`] for the component tree: the token lives in
//! `localStorage` and every state change is mirrored into a signal so guards
//! and the nav bar re-render.

use leptos::*;
use std::rc::Rc;
use std::sync::Arc;

use fd_manager::api::{ApiError, ApiResult, RequestScope};
use fd_manager::session::{AuthError, Session, SessionState, SessionStore, TokenStore, TokenStoreError};

use super::{GlobalState, Load};
use crate::api::{get_api_base, GlooApi};

/// `localStorage` key holding the session token
const TOKEN_KEY: &str = "session_token";

/// Session token kept in the browser's `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
    fn storage(&self) -> Result<web_sys::Storage, TokenStoreError> {
        web_sys::window()
            .ok_or_else(|| TokenStoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|_| TokenStoreError::Unavailable("localStorage access denied".to_string()))?
            .ok_or_else(|| TokenStoreError::Unavailable("localStorage disabled".to_string()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> TokenStoreError {
    TokenStoreError::Unavailable(format!("{:?}", e))
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        self.storage()?.get_item(TOKEN_KEY).map_err(js_error)
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.storage()?.set_item(TOKEN_KEY, token).map_err(js_error)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.storage()?.remove_item(TOKEN_KEY).map_err(js_error)
    }
}

type Store = SessionStore<GlooApi, LocalStorageTokenStore>;

/// Session shared by every page
#[derive(Clone)]
pub struct AuthContext {
    store: Rc<Store>,
    /// Mirror of the store's state
    pub state: RwSignal<SessionState>,
    toasts: GlobalState,
}

/// Create the session, start restoring it, and provide it to the tree
pub fn provide_auth(toasts: GlobalState) {
    let api = Arc::new(GlooApi::new(get_api_base()));
    let store = Rc::new(SessionStore::new(api, LocalStorageTokenStore));
    let state = create_rw_signal(store.current());

    let mut changes = store.subscribe();
    spawn_local(async move {
        while changes.changed().await.is_ok() {
            let next = changes.borrow_and_update().clone();
            state.set(next);
        }
    });

    let restoring = Rc::clone(&store);
    spawn_local(async move {
        restoring.restore().await;
    });

    provide_context(AuthContext {
        store,
        state,
        toasts,
    });
}

impl AuthContext {
    /// Gateway carrying the current credential
    pub fn api(&self) -> Arc<GlooApi> {
        Arc::clone(self.store.api())
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        self.store.login(username, password).await
    }

    pub async fn logout(&self) {
        self.store.logout().await;
    }

    /// Show a failed request to the user. A 401 ends the session;
    /// cancelled requests are silent.
    pub fn report(&self, err: &ApiError) {
        if err.is_cancelled() {
            return;
        }
        if err.is_unauthorized() {
            web_sys::console::info_1(&"Session rejected by server, logging out".into());
            self.store.forget();
        }
        self.toasts.show_error(&err.message());
    }

    /// Store a fetch result in a view's state, reporting any failure
    pub fn settle<T: 'static>(&self, target: RwSignal<Load<T>>, result: ApiResult<T>) {
        if let Err(e) = &result {
            if e.is_cancelled() {
                return;
            }
            self.report(e);
        }
        target.update(|state| state.settle(result));
    }
}

/// Request scope for one page; its requests are aborted when the page
/// unmounts
pub fn page_scope() -> RequestScope {
    let scope = RequestScope::new();
    let owned = scope.clone();
    on_cleanup(move || owned.cancel_all());
    scope
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_survives_in_local_storage() {
        let store = LocalStorageTokenStore;
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        store.save("session-7").unwrap();
        assert_eq!(store.load().unwrap(), Some("session-7".to_string()));
        assert_eq!(LocalStorageTokenStore.load().unwrap(), Some("session-7".to_string()));

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
