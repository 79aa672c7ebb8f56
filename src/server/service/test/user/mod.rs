use crate::{
    model::user::Role,
    server::{
        error::{role::RoleError, AppError},
        service::user::UserService,
    },
};
use test_utils::{builder::TestBuilder, factory};

mod get_all_users;
