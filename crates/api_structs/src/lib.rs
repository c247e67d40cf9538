mod goal;
mod preferences;
mod realtime;
mod relay;
mod reminder;
mod status;
mod task;
mod user;

pub mod dtos {
    pub use crate::goal::dtos::*;
    pub use crate::preferences::dtos::*;
    pub use crate::realtime::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::task::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::goal::api::*;
pub use crate::preferences::api::*;
pub use crate::realtime::api::*;
pub use crate::relay::api::*;
pub use crate::reminder::api::*;
pub use crate::status::api::*;
pub use crate::task::api::*;
pub use crate::user::api::*;
