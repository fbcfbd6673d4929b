use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, AuthUser, Permission},
};
use test_utils::{builder::TestBuilder, factory};

mod require;
