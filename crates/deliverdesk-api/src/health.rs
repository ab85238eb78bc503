// Telehealth endpoints - professional directory and consultations
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::admin::VerificationAction;
use crate::client::ApiClient;
use crate::error::Result;
use crate::pagination::Paginated;
use crate::NO_QUERY;

const DOCTOR_BASE: &str = "/api/v1/doctor";

pub struct HealthApi {
    client: ApiClient,
}

impl HealthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn professionals(
        &self,
        params: &ProfessionalListParams,
    ) -> Result<Paginated<HealthProfessional>> {
        self.client
            .get(&format!("{}/get-all-doctors", DOCTOR_BASE), params)
            .await
    }

    pub async fn professional(&self, id: &str) -> Result<HealthProfessional> {
        self.client
            .get(&format!("{}/{}", DOCTOR_BASE, urlencoding::encode(id)), NO_QUERY)
            .await
    }

    pub async fn verify_professional(
        &self,
        request: &ProfessionalVerification,
    ) -> Result<Option<HealthProfessional>> {
        self.client
            .post(&format!("{}/verify", DOCTOR_BASE), request)
            .await
    }

    pub async fn appointments(&self, params: &AppointmentParams) -> Result<Paginated<Consultation>> {
        self.client
            .get(&format!("{}/appointments", DOCTOR_BASE), params)
            .await
    }

    pub async fn appointment(&self, id: &str) -> Result<Consultation> {
        self.client
            .get(
                &format!("{}/appointments/{}", DOCTOR_BASE, urlencoding::encode(id)),
                NO_QUERY,
            )
            .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfessional {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub specialization: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub consultation_fee: f64,
    pub years_of_experience: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl HealthProfessional {
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        format!("Dr. {}", name.trim())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalVerification {
    pub doctor_id: String,
    pub action: VerificationAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Lifecycle of a consultation booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationStatus {
    Booked,
    Pending,
    Scheduled,
    Ongoing,
    Completed,
    Cancelled,
    Rejected,
    #[serde(other)]
    Other,
}

impl ConsultationStatus {
    pub fn all() -> [ConsultationStatus; 7] {
        [
            ConsultationStatus::Booked,
            ConsultationStatus::Pending,
            ConsultationStatus::Scheduled,
            ConsultationStatus::Ongoing,
            ConsultationStatus::Completed,
            ConsultationStatus::Cancelled,
            ConsultationStatus::Rejected,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Booked => "BOOKED",
            ConsultationStatus::Pending => "PENDING",
            ConsultationStatus::Scheduled => "SCHEDULED",
            ConsultationStatus::Ongoing => "ONGOING",
            ConsultationStatus::Completed => "COMPLETED",
            ConsultationStatus::Cancelled => "CANCELLED",
            ConsultationStatus::Rejected => "REJECTED",
            ConsultationStatus::Other => "OTHER",
        }
    }

    /// Still waiting to happen or happening right now
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ConsultationStatus::Booked
                | ConsultationStatus::Pending
                | ConsultationStatus::Scheduled
                | ConsultationStatus::Ongoing
        )
    }
}

impl std::fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsultationStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ConsultationStatus::all()
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown consultation status: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationType {
    Video,
    Chat,
    Audio,
    #[serde(other)]
    Other,
}

impl ConsultationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationType::Video => "VIDEO",
            ConsultationType::Chat => "CHAT",
            ConsultationType::Audio => "AUDIO",
            ConsultationType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsultationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VIDEO" => Ok(ConsultationType::Video),
            "CHAT" => Ok(ConsultationType::Chat),
            "AUDIO" => Ok(ConsultationType::Audio),
            _ => Err(format!("unknown consultation type: {}", s)),
        }
    }
}

/// Patient or doctor as embedded in a consultation record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    #[serde(alias = "_id")]
    pub id: String,
    pub patient: Option<Participant>,
    pub doctor: Option<Participant>,
    pub status: ConsultationStatus,
    #[serde(alias = "type")]
    pub consultation_type: ConsultationType,
    #[serde(default)]
    pub fee: f64,
    pub meeting_link: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConsultationStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub consultation_type: Option<ConsultationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_decodes() {
        let json = r#"{
            "_id": "c1",
            "patient": {"_id": "u1", "firstName": "Kemi"},
            "doctor": {"id": "d1", "firstName": "Ifeanyi", "lastName": "Eze"},
            "status": "SCHEDULED",
            "type": "VIDEO",
            "fee": 7500,
            "meetingLink": "https://meet.example.com/abc"
        }"#;
        let consultation: Consultation = serde_json::from_str(json).unwrap();

        assert_eq!(consultation.status, ConsultationStatus::Scheduled);
        assert_eq!(consultation.consultation_type, ConsultationType::Video);
        assert_eq!(consultation.patient.unwrap().id.as_deref(), Some("u1"));
        assert!(consultation.status.is_open());
    }

    #[test]
    fn test_unexpected_values_do_not_break_a_page() {
        let json = r#"{
            "appointments": [
                {"_id": "c1", "status": "COMPLETED", "type": "AUDIO", "fee": 5000},
                {"_id": "c2", "status": "NO_SHOW", "type": "IN_PERSON"}
            ],
            "total": 2
        }"#;
        let page: crate::Paginated<Consultation> = serde_json::from_str(json).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].consultation_type, ConsultationType::Audio);
        assert_eq!(page.items[1].status, ConsultationStatus::Other);
        assert_eq!(page.items[1].consultation_type, ConsultationType::Other);
        assert!(!page.items[1].status.is_open());
        assert!("other".parse::<ConsultationStatus>().is_err());
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("ongoing".parse::<ConsultationStatus>(), Ok(ConsultationStatus::Ongoing));
        assert_eq!("CANCELLED".parse::<ConsultationStatus>(), Ok(ConsultationStatus::Cancelled));
        assert!("LOST".parse::<ConsultationStatus>().is_err());
        assert!(!ConsultationStatus::Completed.is_open());
    }

    #[test]
    fn test_appointment_params_use_type_key() {
        let params = AppointmentParams {
            consultation_type: Some(ConsultationType::Chat),
            status: Some(ConsultationStatus::Booked),
            ..Default::default()
        };
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"status": "BOOKED", "type": "CHAT"}));
    }
}
