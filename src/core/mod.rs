pub mod derangement;
pub mod message;
pub mod sorteo;

pub use crate::domain::model::{Assignment, Participant, SorteoReport};
pub use crate::domain::ports::{ConfigProvider, MessageSender, ParticipantSource};
pub use crate::utils::error::Result;
