//! Test helpers for the HTTP handlers.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, Error, test, web};
use serde::de::DeserializeOwned;

use crate::domain::ports::{MockAccountCommand, MockBooksCommand, MockBooksQuery, MockLoginService};
use crate::domain::{Error as DomainError, Role, User, UserId, Username};

use super::state::HttpState;

/// Mock ports for one test; set expectations, then call [`MockPorts::into_app`].
#[derive(Default)]
pub(crate) struct MockPorts {
    pub login: MockLoginService,
    pub accounts: MockAccountCommand,
    pub books: MockBooksQuery,
    pub books_command: MockBooksCommand,
}

impl MockPorts {
    /// Accept exactly `username`/`password`, returning an account with `role`.
    pub fn accept(&mut self, username: &'static str, password: &'static str, role: Role) {
        self.login.expect_authenticate().returning(move |creds| {
            if creds.username() == username && creds.password() == password {
                Ok(sample_user(2, username, role))
            } else {
                Err(DomainError::unauthorized("Unauthorized access"))
            }
        });
    }

    pub async fn into_app(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>
    {
        let state = HttpState::new(
            Arc::new(self.login),
            Arc::new(self.accounts),
            Arc::new(self.books),
            Arc::new(self.books_command),
        );
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(super::configure)
                .default_service(web::to(super::not_found)),
        )
        .await
    }
}

pub(crate) fn sample_user(id: i32, username: &str, role: Role) -> User {
    User::new(
        UserId::new(id),
        Username::new(username).expect("valid username"),
        role,
    )
}

/// Read a JSON body into `T`.
pub(crate) async fn json_body<T, B>(res: ServiceResponse<B>) -> T
where
    T: DeserializeOwned,
    B: MessageBody,
{
    test::read_body_json(res).await
}
