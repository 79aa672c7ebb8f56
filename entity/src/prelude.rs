pub use super::correction::Entity as Correction;
pub use super::doi_sequence::Entity as DoiSequence;
pub use super::fee_config::Entity as FeeConfig;
pub use super::issue::Entity as Issue;
pub use super::manuscript::Entity as Manuscript;
pub use super::notification::Entity as Notification;
pub use super::payment::Entity as Payment;
pub use super::review::Entity as Review;
pub use super::user::Entity as User;
pub use super::user_role::Entity as UserRole;
pub use super::volume::Entity as Volume;
