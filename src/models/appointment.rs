use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    General,
    Medical,
    Consultation,
    #[serde(rename = "follow-up")]
    FollowUp,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::General => "general",
            AppointmentType::Medical => "medical",
            AppointmentType::Consultation => "consultation",
            AppointmentType::FollowUp => "follow-up",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "medical" => AppointmentType::Medical,
            "consultation" => AppointmentType::Consultation,
            "follow-up" => AppointmentType::FollowUp,
            _ => AppointmentType::General,
        }
    }

    /// Display title used for appointments of this type.
    pub fn title(&self) -> &'static str {
        match self {
            AppointmentType::General => "Appointment",
            AppointmentType::Medical => "Medical Appointment",
            AppointmentType::Consultation => "Consultation",
            AppointmentType::FollowUp => "Follow-up Appointment",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Pending,
        }
    }
}

/// An appointment assembled from a conversational turn, not yet persisted.
/// Only ever constructed once the classifier has decided scheduling intent
/// is present; partial drafts never leave the extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDraft {
    pub title: String,
    pub description: String,
    pub appointment_type: AppointmentType,
    pub appointment_date: NaiveDateTime,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub appointment_date: NaiveDateTime,
    pub duration_minutes: i32,
    pub appointment_type: AppointmentType,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
