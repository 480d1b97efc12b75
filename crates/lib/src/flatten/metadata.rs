//! The single-row "Metadata" table.

use super::{cell::Cell, get_path, get_path_first, MetadataStyle, Table};
use crate::{engine::EngineType, types::ExtractedBulletin};
use serde_json::Value;

pub const METADATA_SHEET: &str = "Metadata";

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Scalar,
    /// A list rendered as one comma-separated cell.
    Joined,
}

#[derive(Debug, Clone, Copy)]
struct MetadataField {
    label: &'static str,
    path: &'static [&'static str],
    kind: FieldKind,
}

const fn scalar(label: &'static str, path: &'static [&'static str]) -> MetadataField {
    MetadataField {
        label,
        path,
        kind: FieldKind::Scalar,
    }
}

const fn joined(label: &'static str, path: &'static [&'static str]) -> MetadataField {
    MetadataField {
        label,
        path,
        kind: FieldKind::Joined,
    }
}

const CFM_FIELDS: &[MetadataField] = &[
    scalar("Document Title", &["documentInfo", "documentTitle"]),
    scalar("Service Bulletin Number", &["documentInfo", "serviceBulletinNumber"]),
    scalar("Revision Number", &["documentInfo", "revisionNumber"]),
    scalar("Issue Date", &["documentInfo", "issueDate"]),
    scalar("Revision Date", &["documentInfo", "revisionDate"]),
    scalar("ATA Chapter", &["documentInfo", "ataChapter"]),
    joined("Engine Models", &["documentInfo", "engineModels"]),
    scalar("Category", &["documentInfo", "category"]),
    scalar("Compliance Type", &["documentInfo", "complianceType"]),
    scalar("Objective", &["reason", "objective"]),
    scalar("Condition", &["reason", "condition"]),
    scalar("Cause", &["reason", "cause"]),
    scalar("Improvement", &["reason", "improvement"]),
    scalar("Substantiation", &["reason", "substantiation"]),
    scalar("Compliance Type (Repeat)", &["compliance", "complianceType"]),
    scalar("Manpower Hours", &["compliance", "manpowerHours"]),
    scalar("Weight Impact", &["compliance", "weightImpact"]),
    scalar("Balance Impact", &["compliance", "balanceImpact"]),
    scalar("Approval", &["approval"]),
    scalar("Industry Support", &["industrySupport"]),
    joined("Tooling Required", &["tooling"]),
];

const LEAP_FIELDS: &[MetadataField] = &[
    scalar("Document Name", &["documentInfo", "documentName"]),
    scalar("Title", &["documentInfo", "title"]),
    scalar("Date", &["documentInfo", "date"]),
    scalar("Reasons for Update", &["documentInfo", "reasonsForUpdate"]),
    scalar("Manufacturer Recommendation", &["documentInfo", "manufacturerRecommendation"]),
    scalar("Task Type", &["documentInfo", "taskType"]),
    scalar("Original Issue Date", &["documentInfo", "originalIssueDate"]),
    scalar(
        "Revision Reason - Issue Number",
        &["documentInfo", "revisionInformation", "revisionReason", "issueNumber"],
    ),
    scalar(
        "Revision Reason - Text",
        &["documentInfo", "revisionInformation", "revisionReason", "revisionReason"],
    ),
    scalar(
        "Revision History - Issue Number",
        &["documentInfo", "revisionInformation", "revisionHistory", "issueNumber"],
    ),
    scalar(
        "Revision History - Issue Date",
        &["documentInfo", "revisionInformation", "revisionHistory", "issueDate"],
    ),
    scalar("Summary Reason", &["documentInfo", "summary", "reason"]),
    scalar(
        "Engine Type",
        &["documentInfo", "planningInformation", "applicability", "engineType"],
    ),
    joined(
        "Engine Models",
        &["documentInfo", "planningInformation", "applicability", "engineModels"],
    ),
    scalar(
        "Concurrent Requirements",
        &["documentInfo", "planningInformation", "concurrentRequirements"],
    ),
    scalar("Objective", &["documentInfo", "planningInformation", "reason", "objective"]),
    scalar("Condition", &["documentInfo", "planningInformation", "reason", "condition"]),
    scalar("Cause", &["documentInfo", "planningInformation", "reason", "cause"]),
    scalar("Improvement", &["documentInfo", "planningInformation", "reason", "improvement"]),
    scalar(
        "Substantiation",
        &["documentInfo", "planningInformation", "reason", "substantiation"],
    ),
    scalar("Description", &["documentInfo", "planningInformation", "description"]),
    scalar(
        "Compliance Category",
        &["documentInfo", "planningInformation", "compliance", "category"],
    ),
    scalar(
        "Compliance Impact",
        &["documentInfo", "planningInformation", "compliance", "impact"],
    ),
    scalar(
        "Compliance Description",
        &["documentInfo", "planningInformation", "compliance", "impactDescription"],
    ),
    scalar("Approval", &["documentInfo", "planningInformation", "approval"]),
    scalar("Manpower", &["documentInfo", "planningInformation", "manpower"]),
    scalar(
        "Weight and Balance",
        &["documentInfo", "planningInformation", "weightAndBalance"],
    ),
    scalar(
        "Electrical Load Data",
        &["documentInfo", "planningInformation", "electricalLoadData"],
    ),
    scalar(
        "Software Summary",
        &["documentInfo", "planningInformation", "softwareAccomplishmentSummary"],
    ),
    scalar(
        "Referenced Docs",
        &["documentInfo", "planningInformation", "referencedDocumentation"],
    ),
    scalar(
        "Docs Affected",
        &["documentInfo", "planningInformation", "documentationAffected"],
    ),
    scalar(
        "Industry Support Info",
        &["documentInfo", "planningInformation", "industrySupportInformation"],
    ),
    scalar(
        "Interchangeability",
        &["documentInfo", "planningInformation", "interchangeability"],
    ),
];

pub(crate) fn metadata_table(bulletin: &ExtractedBulletin, style: MetadataStyle) -> Table {
    let (mut headers, mut row) = match style {
        MetadataStyle::Labeled => labeled_columns(bulletin),
        MetadataStyle::Raw => raw_columns(&bulletin.data),
    };

    headers.push("Engine Family".to_string());
    row.push(Cell::from(bulletin.engine.as_str()));
    headers.push("Source File".to_string());
    row.push(Cell::from(bulletin.source_name.as_str()));

    Table {
        name: METADATA_SHEET.to_string(),
        headers,
        rows: vec![row],
    }
}

fn labeled_columns(bulletin: &ExtractedBulletin) -> (Vec<String>, Vec<Cell>) {
    let fields = match bulletin.engine {
        EngineType::Cfm => CFM_FIELDS,
        EngineType::Leap => LEAP_FIELDS,
    };

    fields
        .iter()
        .map(|field| {
            let value = get_path_first(&bulletin.data, field.path);
            let cell = match field.kind {
                FieldKind::Scalar => Cell::from_optional(value),
                FieldKind::Joined => join_list(value),
            };
            (field.label.to_string(), cell)
        })
        .unzip()
}

/// Every key of `documentInfo`, in the order the model returned them.
fn raw_columns(data: &Value) -> (Vec<String>, Vec<Cell>) {
    get_path(data, &["documentInfo"])
        .and_then(Value::as_object)
        .map(|info| {
            info.iter()
                .map(|(key, value)| (key.clone(), Cell::from_json(value)))
                .unzip()
        })
        .unwrap_or_default()
}

fn join_list(value: Option<&Value>) -> Cell {
    match value {
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            if parts.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(parts.join(", "))
            }
        }
        other => Cell::from_optional(other),
    }
}
