use super::{array_of, nullable, nullable_strings, FunctionSchema};
use serde_json::json;

pub const CFM_FUNCTION_NAME: &str = "parse_cfm_service_bulletin";

/// Schema for CFM56-5B service bulletins.
pub fn cfm_schema() -> FunctionSchema {
    let document_info = json!({
        "type": "object",
        "properties": {
            "documentTitle": nullable("string"),
            "serviceBulletinNumber": nullable("string"),
            "revisionNumber": nullable("string"),
            "issueDate": nullable("string"),
            "revisionDate": nullable("string"),
            "ataChapter": nullable("string"),
            "engineModels": array_of(nullable("string")),
            "category": nullable("string"),
            "complianceType": nullable("string")
        }
    });

    let compliance = json!({
        "type": "object",
        "properties": {
            "complianceType": nullable("string"),
            "manpowerHours": nullable("number"),
            "weightImpact": nullable("number"),
            "balanceImpact": nullable("number")
        }
    });

    let part = json!({
        "type": "object",
        "properties": {
            "partNumber": nullable("string"),
            "quantity": nullable("integer"),
            "unitCost": nullable("number"),
            "currency": nullable("string"),
            "notes": nullable("string")
        }
    });

    let parameters = json!({
        "type": "object",
        "properties": {
            "documentInfo": document_info,
            "reason": nullable_strings(&["objective", "condition", "cause", "improvement", "substantiation"]),
            "compliance": compliance,
            "materialInformation": {
                "type": "object",
                "properties": { "parts": array_of(part) }
            },
            "configurationChanges": array_of(nullable_strings(&["oldConfig", "newConfig", "notes"])),
            "approval": nullable("string"),
            "industrySupport": nullable("string"),
            "tooling": array_of(nullable("string"))
        },
        "required": ["documentInfo"]
    });

    FunctionSchema::new(
        CFM_FUNCTION_NAME,
        "Extracts metadata and parts information from CFM56-5B service bulletins.",
        parameters,
    )
}
