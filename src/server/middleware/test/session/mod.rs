use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::CsrfSession,
    service::oauth::OAuthProvider,
};
use test_utils::builder::TestBuilder;

mod csrf;
