use crate::{
    model::correction::CorrectionKind,
    server::{data::correction::CorrectionRepository, model::correction::CreateCorrectionParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};
