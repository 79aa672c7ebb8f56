use crate::{
    model::correction::{CorrectionKind, CorrectionStatus},
    server::{
        error::AppError,
        model::correction::CreateCorrectionParams,
        service::{
            correction::CorrectionService, doi::format::DoiFormat,
            notification::NotificationService,
        },
    },
};
use chrono::{Datelike, Utc};
use sea_orm::EntityTrait;
use test_utils::{builder::TestBuilder, factory};

mod create;

fn erratum(manuscript_id: i32, created_by: i32) -> CreateCorrectionParams {
    CreateCorrectionParams {
        manuscript_id,
        kind: CorrectionKind::Erratum,
        description: "Figure 2 axis labels were swapped".to_string(),
        created_by,
    }
}
