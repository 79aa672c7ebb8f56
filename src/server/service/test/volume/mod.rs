use crate::{
    model::{manuscript::ManuscriptStatus, volume::IssueStatus},
    server::{
        error::AppError,
        model::volume::{CreateIssueParams, CreateVolumeParams},
        service::{doi::format::DoiFormat, volume::VolumeService},
    },
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};
