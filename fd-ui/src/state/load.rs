//! Fetch State
//!
//! What a view shows for data it fetches on mount. Failed fetches end the
//! spinner; data already on screen is kept when a refresh fails.

use fd_manager::api::ApiResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Load<T> {
    fn default() -> Self {
        Load::Loading
    }
}

impl<T> Load<T> {
    /// Apply a finished request. Cancelled requests change nothing.
    pub fn settle(&mut self, result: ApiResult<T>) {
        match result {
            Ok(value) => *self = Load::Ready(value),
            Err(e) if e.is_cancelled() => {}
            Err(e) => {
                if !matches!(self, Load::Ready(_)) {
                    *self = Load::Failed(e.message());
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Load::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }
}
