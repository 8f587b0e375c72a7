use serde::Deserialize;

/// Payload of `GET /api/patients/medical-history/{user_id}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MedicalHistory {
    pub records: Vec<MedicalRecord>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub name: String,
    pub medical_condition: String,
    pub date_of_admission: String,
    #[serde(default)]
    pub verified: bool,
}

/// Payload of `GET /api/appointments/patient/{user_id}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Appointments {
    pub appointments: Vec<Appointment>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Appointment {
    pub patient_name: String,
    pub doctor_name: String,
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Payload of `GET /api/patients/billing/history/{user_id}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BillingHistory {
    pub billing: Vec<BillingEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BillingEntry {
    pub user_id: u64,
    pub amount: f64,
    #[serde(default)]
    pub verified: bool,
}

/// Payload of `GET /api/patients/wearable/{user_id}`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WearableSnapshot {
    pub wearable_data: WearableData,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WearableData {
    pub heart_rate: f64,
    pub steps: u64,
}

/// Single message in the telemedicine chat, both as the reply to
/// `POST /api/telemedicine/chat` and as the `chatUpdate` push payload.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatMessage {
    #[serde(rename = "from")]
    pub sender: String,
    pub message: String,
}

/// Payload of `POST /login`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Appointments, ChatMessage, LoginResponse, WearableSnapshot};
    use serde_json::json;

    #[test]
    fn appointment_optional_fields_default() {
        let payload: Appointments = serde_json::from_value(json!({
            "appointments": [{
                "patient_name": "Kit Walker",
                "doctor_name": "Dr. Osei",
                "date": "2026-08-06T09:30:00Z",
                "status": "scheduled"
            }]
        }))
        .unwrap();
        let appointment = &payload.appointments[0];
        assert!(!appointment.verified);
        assert!(appointment.comment.is_none());
    }

    #[test]
    fn chat_message_renames_from_field() {
        let message: ChatMessage =
            serde_json::from_value(json!({"from": "Dr. Osei", "message": "How are you?"})).unwrap();
        assert_eq!(message.sender, "Dr. Osei");
    }

    #[test]
    fn wearable_snapshot_shape() {
        let snapshot: WearableSnapshot = serde_json::from_value(json!({
            "wearable_data": {"heart_rate": 72.0, "steps": 8421},
            "verified": true
        }))
        .unwrap();
        assert_eq!(snapshot.wearable_data.steps, 8_421);
        assert!(snapshot.verified);
    }

    #[test]
    fn login_response_ignores_unknown_fields() {
        let response: LoginResponse = serde_json::from_value(json!({
            "token": "jwt",
            "user_id": 7,
            "session_expires": "2026-08-07T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(response.user_id, 7);
        assert!(response.name.is_none());
    }
}
