pub mod baby;
pub mod event;

pub use baby::BabyProfile;
pub use event::{BabyEvent, EventKind};
