pub mod appointment;
pub mod chat;

pub use appointment::{Appointment, AppointmentDraft, AppointmentStatus, AppointmentType};
pub use chat::{ChatMessage, ChatSession};
