// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! User-facing reply texts

use pb_credentials::Credentials;

pub const START: &str = "Hi! I keep logins and passwords for your services.\n\
\n\
/set - remember a login and password\n\
/get - show the login and password of a service\n\
/del - forget the login and password of a service\n\
/getServices - list the services you have saved\n\
/help - show how to use the commands";

pub const HELP: &str = "Commands:\n\
\n\
/set <service> <login> <password>\n\
Remember the login and password for a service\n\
\n\
/get <service>\n\
Show the login and password for a service\n\
\n\
/del <service>\n\
Forget the login and password for a service\n\
\n\
/getServices\n\
List the services you have saved\n\
\n\
Service names, logins and passwords are up to 50 characters without spaces.\n\
Messages with passwords are deleted after a few seconds.";

pub const SET_USAGE: &str = "Usage:\n/set <service> <login> <password>\nExample:\n/set telegram qwerty 12345";
pub const GET_USAGE: &str = "Usage:\n/get <service>\nExample:\n/get telegram";
pub const DEL_USAGE: &str = "Usage:\n/del <service>\nExample:\n/del telegram";

pub const SERVICES_HEADER: &str = "Your services:\n";
pub const NO_SERVICES: &str = "You have no saved services yet\nTry the /set command";

pub const UNKNOWN_COMMAND: &str = "Unknown command";
pub const RETRY: &str = "Something went wrong, please try again later";

pub fn set_created(service: &str) -> String {
    format!("Login and password for service \"{}\" are set", service)
}

pub fn set_updated(service: &str) -> String {
    format!("Login and password for service \"{}\" are updated", service)
}

pub fn get_found(service: &str, credentials: &Credentials) -> String {
    format!(
        "Login and password for service \"{}\":\nLogin: {}\nPassword: {}",
        service, credentials.login, credentials.password
    )
}

pub fn get_unknown(service: &str) -> String {
    format!(
        "I don't know the login and password for service \"{}\"\nTry the /set command",
        service
    )
}

pub fn del_done(service: &str) -> String {
    format!("Login and password for service \"{}\" are reset", service)
}

pub fn del_missing(service: &str) -> String {
    format!("Service \"{}\" not found\nNothing to reset", service)
}

pub fn services_list(services: &[String]) -> String {
    format!("{}{}", SERVICES_HEADER, services.join("\n"))
}
