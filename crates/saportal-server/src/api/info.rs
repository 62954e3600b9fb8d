//! Static reference data: SASSA grant payment dates, the guide catalogue and
//! the contact form acknowledgement.

use axum::{Extension, Form, Json};
use chrono::NaiveDate;
use saportal_core::clock;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{now_iso, ApiError};

/// Grant payment start dates for 2026 as (month, day).
const PAYMENT_DATES_2026: [(u32, u32); 12] = [
    (1, 5),
    (2, 2),
    (3, 2),
    (4, 1),
    (5, 5),
    (6, 2),
    (7, 1),
    (8, 4),
    (9, 1),
    (10, 6),
    (11, 3),
    (12, 1),
];
const PAYMENT_YEAR: i32 = 2026;

#[derive(Debug, Serialize)]
pub(super) struct SassaContacts {
    helpline: &'static str,
    whatsapp: &'static str,
    website: &'static str,
    email: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct PaymentDates {
    success: bool,
    next_payment_date: String,
    payment_window: &'static str,
    current_year: String,
    official_contacts: SassaContacts,
}

fn payment_dates() -> impl Iterator<Item = NaiveDate> {
    PAYMENT_DATES_2026
        .iter()
        .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(PAYMENT_YEAR, month, day))
}

/// The first payment date on or after `today`, wrapping to the first date of
/// the year once the calendar is exhausted.
fn next_payment(today: NaiveDate) -> Option<NaiveDate> {
    payment_dates()
        .find(|date| *date >= today)
        .or_else(|| payment_dates().next())
}

pub(super) async fn sassa_payment_dates() -> Json<PaymentDates> {
    let next = next_payment(clock::sast_today())
        .map(|d| d.format("%-d %B %Y").to_string())
        .unwrap_or_default();

    Json(PaymentDates {
        success: true,
        next_payment_date: next,
        payment_window: "1st - 5th of each month",
        current_year: PAYMENT_YEAR.to_string(),
        official_contacts: SassaContacts {
            helpline: "0800 60 10 11",
            whatsapp: "082 046 8553",
            website: "https://www.sassa.gov.za",
            email: "GrantEnquiries@sassa.gov.za",
        },
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    /// Name of the first required field that is absent or blank.
    fn first_missing(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ContactReceipt {
    success: bool,
    message: &'static str,
    response_time: &'static str,
    timestamp: String,
}

pub(super) async fn submit_contact(
    Extension(req_id): Extension<RequestId>,
    Form(form): Form<ContactForm>,
) -> Result<Json<ContactReceipt>, ApiError> {
    if let Some(field) = form.first_missing() {
        return Err(ApiError::bad_request(
            req_id.0,
            format!("Missing required field: {field}"),
        ));
    }

    tracing::info!(
        request_id = %req_id.0,
        subject = form.subject.as_deref().unwrap_or_default(),
        "contact form received"
    );

    Ok(Json(ContactReceipt {
        success: true,
        message: "Message received successfully",
        response_time: "24-48 hours",
        timestamp: now_iso(),
    }))
}

#[derive(Debug, Serialize)]
pub(super) struct Guide {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: &'static str,
    estimated_time: &'static str,
    steps: u32,
}

const GUIDES: [Guide; 4] = [
    Guide {
        id: "sassa-srd-application",
        title: "SRD R350 Grant Application",
        description: "Complete step-by-step guide to applying for the Social Relief of Distress R350 grant",
        category: "sassa",
        difficulty: "easy",
        estimated_time: "15 minutes",
        steps: 7,
    },
    Guide {
        id: "id-application",
        title: "Smart ID Card Application",
        description: "How to apply for a South African Smart ID Card",
        category: "id",
        difficulty: "medium",
        estimated_time: "30 minutes",
        steps: 8,
    },
    Guide {
        id: "tax-return",
        title: "SARS Tax Return Filing",
        description: "Guide to filing your annual tax return with SARS",
        category: "tax",
        difficulty: "medium",
        estimated_time: "25 minutes",
        steps: 6,
    },
    Guide {
        id: "drivers-license",
        title: "Drivers License Renewal",
        description: "Complete process for renewing your South African drivers license",
        category: "license",
        difficulty: "medium",
        estimated_time: "20 minutes",
        steps: 5,
    },
];

#[derive(Debug, Serialize)]
pub(super) struct GuideList {
    success: bool,
    guides: &'static [Guide],
    total: usize,
    timestamp: String,
}

pub(super) async fn list_guides() -> Json<GuideList> {
    Json(GuideList {
        success: true,
        guides: &GUIDES,
        total: GUIDES.len(),
        timestamp: now_iso(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_payment_includes_today() {
        assert_eq!(next_payment(date(2026, 3, 2)), Some(date(2026, 3, 2)));
    }

    #[test]
    fn next_payment_moves_to_following_month() {
        assert_eq!(next_payment(date(2026, 3, 3)), Some(date(2026, 4, 1)));
    }

    #[test]
    fn next_payment_wraps_after_last_date() {
        assert_eq!(next_payment(date(2026, 12, 2)), Some(date(2026, 1, 5)));
    }

    #[test]
    fn contact_form_reports_first_missing_field() {
        let form = ContactForm {
            name: Some("Thandi".to_string()),
            email: None,
            subject: Some("  ".to_string()),
            message: None,
        };
        assert_eq!(form.first_missing(), Some("email"));
    }

    #[test]
    fn complete_contact_form_has_nothing_missing() {
        let form = ContactForm {
            name: Some("Thandi".to_string()),
            email: Some("thandi@example.co.za".to_string()),
            subject: Some("SRD status".to_string()),
            message: Some("When is my next payment?".to_string()),
        };
        assert_eq!(form.first_missing(), None);
    }
}
