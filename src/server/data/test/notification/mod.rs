use crate::server::{
    data::notification::NotificationRepository,
    model::notification::{CreateNotificationParams, NotificationKind},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
