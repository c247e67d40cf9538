mod preferences;
mod reminder;
mod shared;
mod target;
mod user;
pub mod validation;

pub use preferences::{ReminderTimes, UserPreferences};
pub use reminder::{DeliveryChannels, Reminder, ReminderKind, ReminderStatus};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use target::{Goal, ReminderTarget, TargetKind, Task};
pub use user::User;
pub use validation::ReminderValidationError;
