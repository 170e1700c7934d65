//! Credentials and addressing scopes passed to every operation.

/// An Aeris account and the API key used to call on its behalf.
///
/// For AerFrame subscription and SMS calls the key is the application's own
/// `apiKey`, not the account key.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub api_key: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Account {
    pub fn new(id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api_key: api_key.into(),
        }
    }

    /// Scope this account to one AerFrame application.
    pub fn app(&self, app_short_name: impl Into<String>) -> AppScope {
        AppScope {
            account: self.clone(),
            app_short_name: app_short_name.into(),
        }
    }
}

/// An account plus the short name of one AerFrame application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppScope {
    pub account: Account,
    pub app_short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_api_key() {
        let account = Account::new("123", "super-secret");
        let debug = format!("{:?}", account.app("aerframesdk"));
        assert!(debug.contains("123"));
        assert!(debug.contains("aerframesdk"));
        assert!(!debug.contains("super-secret"));
    }
}
