use log::info;
use serde_json::Value;

use super::{
    local_storage::{LocalStorage, StorageError, ADMIN_TOKEN_KEY, LOGIN_FLAG_KEY, USER_KEY},
    models::User,
};

/// Who is using the site right now, restored from local storage once and
/// then handed down from the root controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<User>,
    admin_token: Option<String>,
}

/// The registration pages store the flag as the string `"true"`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => text == "true",
        _ => false,
    }
}

impl Session {
    pub fn restore(storage: &LocalStorage) -> Result<Self, StorageError> {
        let logged_in = storage
            .get_raw(LOGIN_FLAG_KEY)?
            .is_some_and(|flag| is_truthy(&flag));
        let user = if logged_in {
            storage.get::<User>(USER_KEY)?
        } else {
            None
        };
        let admin_token = storage.get::<String>(ADMIN_TOKEN_KEY)?;
        Ok(Session { user, admin_token })
    }

    /// Logged in means both the flag and the user blob were present.
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.admin_token.is_some()
    }

    /// Leaves the admin area only. The public-site login stays in place.
    pub fn logout(&mut self, storage: &LocalStorage) -> Result<(), StorageError> {
        storage.remove(ADMIN_TOKEN_KEY)?;
        self.admin_token = None;
        info!("Admin session closed");
        Ok(())
    }
}
