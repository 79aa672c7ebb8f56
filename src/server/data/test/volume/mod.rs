use crate::server::{
    data::volume::VolumeRepository,
    model::volume::{CreateIssueParams, CreateVolumeParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod claim_issue_for_publication;
