use crate::{
    model::manuscript::{CopyEditingStage, ManuscriptStatus, MetricKind},
    server::{
        data::manuscript::ManuscriptRepository,
        model::manuscript::{Author, CreateManuscriptParams, ManuscriptFilter},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod doi;
mod find_by_issue;
mod get_paginated;
