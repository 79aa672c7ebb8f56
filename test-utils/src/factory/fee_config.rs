//! Fee configuration factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Id of the single active fee configuration row.
pub const ACTIVE_FEE_CONFIG_ID: i32 = 1;

/// A representative fee configuration document.
///
/// - research: 1500.00, review: 1200.00, default: 1000.00 USD
/// - waiver countries: AF, NP
/// - IN: 50% discount, BR: flat 300.00 discount
pub fn sample_document() -> serde_json::Value {
    serde_json::json!({
        "default_base_fee": "1000.00",
        "currency": "USD",
        "article_fees": [
            { "article_type": "research", "fee": "1500.00" },
            { "article_type": "review", "fee": "1200.00" }
        ],
        "country_discounts": [
            { "country": "IN", "kind": "percentage", "value": "50", "reason": null },
            { "country": "BR", "kind": "flat", "value": "300.00", "reason": "Regional support" }
        ],
        "waiver_countries": ["AF", "NP"],
        "institution_waivers": []
    })
}

/// Inserts the active fee configuration row with the given document.
pub async fn create_fee_config(
    db: &DatabaseConnection,
    document: serde_json::Value,
) -> Result<entity::fee_config::Model, DbErr> {
    entity::fee_config::ActiveModel {
        id: ActiveValue::Set(ACTIVE_FEE_CONFIG_ID),
        document: ActiveValue::Set(document),
        updated_by: ActiveValue::Set(None),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
