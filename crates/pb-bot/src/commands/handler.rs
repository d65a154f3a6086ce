// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Command handlers backed by a credential store

use super::{messages, Command};
use crate::error::{CommandError, CommandResult};
use pb_credentials::{validate_field, validate_fields, CredentialStore, UserId};
use pb_logging::redact;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes commands for a user against the shared credential store.
///
/// Every handler receives the raw argument string (everything after the first
/// space of the message) and returns the reply text.
#[derive(Clone)]
pub struct CredentialsHandler {
    store: Arc<dyn CredentialStore>,
}

impl CredentialsHandler {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Route a parsed command to its handler
    pub async fn handle(&self, command: Command, user_id: UserId, args: &str) -> CommandResult {
        match command {
            Command::Start => self.start(user_id, args).await,
            Command::Set => self.set(user_id, args).await,
            Command::Get => self.get(user_id, args).await,
            Command::Del => self.del(user_id, args).await,
            Command::GetServices => self.get_services(user_id, args).await,
            Command::Help => self.help(user_id, args).await,
        }
    }

    pub async fn start(&self, user_id: UserId, _args: &str) -> CommandResult {
        debug!(user_id, "greeting user");
        Ok(messages::START.to_string())
    }

    pub async fn help(&self, _user_id: UserId, _args: &str) -> CommandResult {
        Ok(messages::HELP.to_string())
    }

    /// `/set <service> <login> <password>`: exactly three single-space separated fields
    pub async fn set(&self, user_id: UserId, args: &str) -> CommandResult {
        let fields: Vec<&str> = args.split(' ').collect();
        let [service, login, password] = fields.as_slice() else {
            return Err(CommandError::usage(messages::SET_USAGE));
        };
        if !validate_fields([*service, *login, *password]) {
            return Err(CommandError::usage(messages::SET_USAGE));
        }

        let created = self
            .store
            .set(user_id, service, login, password)
            .await
            .map_err(store_failure("set", user_id))?;

        info!(
            user_id,
            service,
            login = redact(login),
            created,
            "credentials stored"
        );

        Ok(if created {
            messages::set_created(service)
        } else {
            messages::set_updated(service)
        })
    }

    /// `/get <service>`: the whole argument string is the service name
    pub async fn get(&self, user_id: UserId, args: &str) -> CommandResult {
        let service = args;
        if !validate_field(service) {
            return Err(CommandError::usage(messages::GET_USAGE));
        }

        let credentials = self
            .store
            .get(user_id, service)
            .await
            .map_err(store_failure("get", user_id))?;

        match credentials {
            Some(credentials) => {
                debug!(user_id, service, "credentials found");
                Ok(messages::get_found(service, &credentials))
            }
            None => Err(CommandError::Usage(messages::get_unknown(service))),
        }
    }

    /// `/del <service>`: deleting an unknown service still succeeds
    pub async fn del(&self, user_id: UserId, args: &str) -> CommandResult {
        let service = args;
        if !validate_field(service) {
            return Err(CommandError::usage(messages::DEL_USAGE));
        }

        let existed = self
            .store
            .del(user_id, service)
            .await
            .map_err(store_failure("del", user_id))?;

        info!(user_id, service, existed, "credentials deleted");

        Ok(if existed {
            messages::del_done(service)
        } else {
            messages::del_missing(service)
        })
    }

    /// `/getServices`: arguments are ignored
    pub async fn get_services(&self, user_id: UserId, _args: &str) -> CommandResult {
        let services = self
            .store
            .services(user_id)
            .await
            .map_err(store_failure("getServices", user_id))?;

        if services.is_empty() {
            Ok(messages::NO_SERVICES.to_string())
        } else {
            Ok(messages::services_list(&services))
        }
    }
}

fn store_failure(
    operation: &'static str,
    user_id: UserId,
) -> impl FnOnce(pb_credentials::Error) -> CommandError {
    move |source| {
        warn!(user_id, operation, error = %source, "credential store failed");
        CommandError::Handler { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pb_credentials::{Credentials, MemoryStore};

    mockall::mock! {
        pub Store {}

        #[async_trait]
        impl CredentialStore for Store {
            async fn set(
                &self,
                user_id: UserId,
                service: &str,
                login: &str,
                password: &str,
            ) -> pb_credentials::Result<bool>;
            async fn get(
                &self,
                user_id: UserId,
                service: &str,
            ) -> pb_credentials::Result<Option<Credentials>>;
            async fn del(&self, user_id: UserId, service: &str) -> pb_credentials::Result<bool>;
            async fn services(&self, user_id: UserId) -> pb_credentials::Result<Vec<String>>;
        }
    }

    fn memory_handler() -> (CredentialsHandler, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (CredentialsHandler::new(store.clone()), store)
    }

    fn pool_closed() -> pb_credentials::Error {
        pb_credentials::Error::Pool("pool closed".to_string())
    }

    /// A store that must not be called at all
    fn untouched_store() -> CredentialsHandler {
        let mut store = MockStore::new();
        store.expect_set().never();
        store.expect_get().never();
        store.expect_del().never();
        store.expect_services().never();
        CredentialsHandler::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_set_creates_then_updates() {
        let (handler, store) = memory_handler();

        assert_eq!(
            handler.set(1, "telegram qwerty 12345").await.unwrap(),
            "Login and password for service \"telegram\" are set"
        );
        assert_eq!(
            handler.set(1, "telegram qwerty 54321").await.unwrap(),
            "Login and password for service \"telegram\" are updated"
        );
        assert_eq!(
            store.get(1, "telegram").await.unwrap(),
            Some(Credentials::new("qwerty", "54321"))
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_set_rejects_wrong_field_count() {
        let handler = untouched_store();

        for args in [
            "",
            "telegram",
            "telegram qwerty",
            "telegram qwerty 12345 extra",
            "telegram  qwerty 12345",
            "telegram qwerty 12345 ",
        ] {
            let err = handler.set(1, args).await.unwrap_err();
            assert!(err.is_usage(), "args {:?} should be a usage error", args);
            assert_eq!(err.user_message(), messages::SET_USAGE);
        }
    }

    #[tokio::test]
    async fn test_set_rejects_overlong_service_without_touching_store() {
        let (handler, store) = memory_handler();
        let args = format!("{} me pw", "x".repeat(51));

        let err = handler.set(2, &args).await.unwrap_err();

        assert_eq!(err.user_message(), messages::SET_USAGE);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_accepts_fifty_character_fields() {
        let (handler, store) = memory_handler();
        let field = "x".repeat(50);
        let args = format!("{0} {0} {0}", field);

        handler.set(1, &args).await.unwrap();

        assert_eq!(
            store.get(1, &field).await.unwrap(),
            Some(Credentials::new(&field, &field))
        );
    }

    #[tokio::test]
    async fn test_set_rejects_tab_inside_field() {
        let handler = untouched_store();
        let err = handler.set(1, "mail me\tyou secret").await.unwrap_err();
        assert!(err.is_usage());
    }

    #[tokio::test]
    async fn test_get_found() {
        let (handler, _store) = memory_handler();
        handler.set(1, "telegram qwerty 12345").await.unwrap();

        assert_eq!(
            handler.get(1, "telegram").await.unwrap(),
            "Login and password for service \"telegram\":\nLogin: qwerty\nPassword: 12345"
        );
    }

    #[tokio::test]
    async fn test_get_unknown_service_is_usage_error() {
        let (handler, _store) = memory_handler();

        let err = handler.get(1, "telegram").await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "I don't know the login and password for service \"telegram\"\nTry the /set command"
        );
    }

    #[tokio::test]
    async fn test_get_treats_whole_argument_as_service() {
        let handler = untouched_store();

        for args in ["", "mail extra", " mail"] {
            let err = handler.get(1, args).await.unwrap_err();
            assert_eq!(err.user_message(), messages::GET_USAGE);
        }
    }

    #[tokio::test]
    async fn test_get_is_scoped_to_user() {
        let (handler, _store) = memory_handler();
        handler.set(1, "mail me secret").await.unwrap();

        assert!(handler.get(2, "mail").await.unwrap_err().is_usage());
    }

    #[tokio::test]
    async fn test_del_existing_and_missing() {
        let (handler, store) = memory_handler();
        handler.set(1, "telegram qwerty 12345").await.unwrap();

        assert_eq!(
            handler.del(1, "telegram").await.unwrap(),
            "Login and password for service \"telegram\" are reset"
        );
        assert!(store.is_empty().await);
        assert_eq!(
            handler.del(1, "telegram").await.unwrap(),
            "Service \"telegram\" not found\nNothing to reset"
        );
    }

    #[tokio::test]
    async fn test_del_rejects_invalid_argument() {
        let handler = untouched_store();

        let err = handler.del(1, "").await.unwrap_err();
        assert_eq!(err.user_message(), messages::DEL_USAGE);

        let err = handler.del(1, &"x".repeat(51)).await.unwrap_err();
        assert_eq!(err.user_message(), messages::DEL_USAGE);
    }

    #[tokio::test]
    async fn test_get_services_lists_names() {
        let (handler, _store) = memory_handler();
        handler.set(1, "mail me one").await.unwrap();
        handler.set(1, "bank me two").await.unwrap();

        let reply = handler.get_services(1, "ignored args").await.unwrap();
        let names = reply.strip_prefix(messages::SERVICES_HEADER).unwrap();
        let mut names: Vec<&str> = names.split('\n').collect();
        names.sort();

        assert_eq!(names, vec!["bank", "mail"]);
    }

    #[tokio::test]
    async fn test_get_services_empty() {
        let (handler, _store) = memory_handler();
        assert_eq!(
            handler.get_services(1, "").await.unwrap(),
            messages::NO_SERVICES
        );
    }

    #[tokio::test]
    async fn test_start_and_help_ignore_arguments() {
        let handler = untouched_store();
        assert_eq!(handler.start(1, "anything").await.unwrap(), messages::START);
        assert_eq!(handler.help(1, "").await.unwrap(), messages::HELP);
    }

    #[tokio::test]
    async fn test_store_failures_become_handler_errors() {
        let mut store = MockStore::new();
        store.expect_set().returning(|_, _, _, _| Err(pool_closed()));
        store.expect_get().returning(|_, _| Err(pool_closed()));
        store.expect_del().returning(|_, _| Err(pool_closed()));
        store.expect_services().returning(|_| Err(pool_closed()));
        let handler = CredentialsHandler::new(Arc::new(store));

        let results = [
            ("set", handler.set(1, "mail me secret").await),
            ("get", handler.get(1, "mail").await),
            ("del", handler.del(1, "mail").await),
            ("getServices", handler.get_services(1, "").await),
        ];

        for (expected, result) in results {
            match result {
                Err(CommandError::Handler { operation, .. }) => assert_eq!(operation, expected),
                other => panic!("expected handler error for {}, got {:?}", expected, other),
            }
        }
    }

    #[tokio::test]
    async fn test_handle_routes_to_handler() {
        let (handler, _store) = memory_handler();

        handler
            .handle(Command::Set, 5, "mail me secret")
            .await
            .unwrap();
        let reply = handler.handle(Command::Get, 5, "mail").await.unwrap();
        assert!(reply.contains("Password: secret"));
        assert_eq!(
            handler.handle(Command::Help, 5, "").await.unwrap(),
            messages::HELP
        );
    }
}
