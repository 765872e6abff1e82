// Billing records: electricity agreement, invoices, consumption.

use serde::Serialize;
use serde_json::Value;

use super::{FromPayload, float_field, int_field, list_field, object_field, str_field, text_field};

/// Lifecycle state of one side (consumption or production) of an agreement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgreementState {
    pub state_category: Option<String>,
    pub state_id: Option<i64>,
    pub site_id: Option<i64>,
    pub start_date: Option<String>,
    pub termination_date: Option<String>,
}

impl FromPayload for AgreementState {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            state_category: str_field(value, "stateCategory"),
            state_id: int_field(value, "stateId"),
            site_id: int_field(value, "siteId"),
            start_date: str_field(value, "startDate"),
            termination_date: str_field(value, "terminationDate"),
        })
    }
}

/// `GET /asset-owner/{ownerId}/electricity-agreement`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElectricityAgreement {
    pub consumption: Option<AgreementState>,
    pub production: Option<AgreementState>,
}

impl FromPayload for ElectricityAgreement {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            consumption: object_field(value, "consumption"),
            production: object_field(value, "production"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub item_id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub volume: String,
    pub amount: String,
    /// Passed through untouched; the shape varies per line type.
    pub settlements: Value,
}

impl FromPayload for InvoiceLine {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            item_id: text_field(value, "item_id"),
            name: text_field(value, "name"),
            description: text_field(value, "description"),
            price: text_field(value, "price"),
            volume: text_field(value, "volume"),
            amount: text_field(value, "amount"),
            settlements: value
                .get("settlements")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        })
    }
}

/// `GET /asset-owner/{ownerId}/invoice` entry; may nest sub-group invoices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Invoice {
    pub id: String,
    pub due_date: Option<String>,
    pub ocr: Option<String>,
    pub invoice_status: Option<String>,
    pub invoice_has_settlements: Option<String>,
    pub invoice_status_id: Option<String>,
    pub invoice_create_date: Option<String>,
    pub invoiced_month: Option<String>,
    pub invoice_period: Option<String>,
    pub invoice_date: Option<String>,
    pub total_amount: Option<String>,
    pub remaining_amount: Option<String>,
    pub invoice_lines: Vec<InvoiceLine>,
    pub invoice_pdf: Option<String>,
    pub invoice_type_id: Option<String>,
    pub invoice_type: Option<String>,
    pub claim_status: Option<String>,
    pub claim_reminder_pdf: Option<String>,
    pub site_id: Option<String>,
    pub sub_group_invoices: Vec<Invoice>,
    pub current_payment_type_id: Option<String>,
    pub current_payment_type_name: Option<String>,
}

impl FromPayload for Invoice {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            id: text_field(value, "id"),
            due_date: str_field(value, "due_date"),
            ocr: str_field(value, "ocr"),
            invoice_status: str_field(value, "invoice_status"),
            invoice_has_settlements: str_field(value, "invoice_has_settlements"),
            invoice_status_id: str_field(value, "invoice_status_id"),
            invoice_create_date: str_field(value, "invoice_create_date"),
            invoiced_month: str_field(value, "invoiced_month"),
            invoice_period: str_field(value, "invoice_period"),
            invoice_date: str_field(value, "invoice_date"),
            total_amount: str_field(value, "total_amount"),
            remaining_amount: str_field(value, "remaining_amount"),
            invoice_lines: list_field(value, "invoice_lines"),
            invoice_pdf: str_field(value, "invoice_pdf"),
            invoice_type_id: str_field(value, "invoice_type_id"),
            invoice_type: str_field(value, "invoice_type"),
            claim_status: str_field(value, "claim_status"),
            claim_reminder_pdf: str_field(value, "claim_reminder_pdf"),
            site_id: str_field(value, "site_id"),
            sub_group_invoices: list_field(value, "sub_group_invoices"),
            current_payment_type_id: str_field(value, "current_payment_type_id"),
            current_payment_type_name: str_field(value, "current_payment_type_name"),
        })
    }
}

/// `GET /asset-owner/{ownerId}/consumption` entry (reading or calculated).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    pub site_id: String,
    pub valid_from: String,
    pub valid_to: Option<String>,
    pub invoiced_month: String,
    pub volume: Option<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub type_id: Option<i64>,
}

impl FromPayload for ConsumptionRecord {
    fn from_payload(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            site_id: text_field(value, "site_id"),
            valid_from: text_field(value, "valid_from"),
            valid_to: str_field(value, "valid_to").filter(|s| !s.is_empty()),
            invoiced_month: text_field(value, "invoiced_month"),
            volume: float_field(value, "volume"),
            kind: text_field(value, "type"),
            type_id: int_field(value, "type_id"),
        })
    }
}
