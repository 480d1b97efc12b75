use super::{array_of, nullable, nullable_strings, FunctionSchema};
use serde_json::{json, Value};

pub const LEAP_FUNCTION_NAME: &str = "parse_leap_service_bulletin";

/// Schema for LEAP service bulletins.
///
/// Unlike the CFM layout, everything (including the spares lists) hangs off
/// `documentInfo`.
pub fn leap_schema() -> FunctionSchema {
    let document_info = json!({
        "type": "object",
        "properties": {
            "documentName": nullable("string"),
            "title": nullable("string"),
            "date": nullable("string"),
            "reasonsForUpdate": nullable("string"),
            "manufacturerRecommendation": nullable("string"),
            "taskType": nullable("string"),
            "originalIssueDate": nullable("string"),
            "revisionInformation": array_of(revision_information()),
            "summary": nullable_strings(&["reason"]),
            "planningInformation": planning_information(),
            "materialInformation": {
                "type": "object",
                "properties": {
                    "listOfSpares": array_of(spare()),
                    "listOfRemovedSpares": array_of(spare())
                }
            }
        }
    });

    let parameters = json!({
        "type": "object",
        "properties": { "documentInfo": document_info },
        "required": ["documentInfo"]
    });

    FunctionSchema::new(
        LEAP_FUNCTION_NAME,
        "Extracts metadata and parts info from LEAP service bulletins.",
        parameters,
    )
}

fn revision_information() -> Value {
    json!({
        "type": "object",
        "properties": {
            "revisionReason": array_of(nullable_strings(&["issueNumber", "revisionReason"])),
            "revisionHistory": array_of(nullable_strings(&["issueNumber", "issueDate"]))
        }
    })
}

fn planning_information() -> Value {
    let applicability = json!({
        "type": "object",
        "properties": {
            "engineType": nullable("string"),
            "engineModels": { "type": ["array", "null"], "items": { "type": "string" } }
        }
    });

    let mut properties = json!({
        "applicability": applicability,
        "reason": nullable_strings(&["objective", "condition", "cause", "improvement", "substantiation"]),
        "compliance": nullable_strings(&["category", "impact", "impactDescription"])
    });

    for field in [
        "concurrentRequirements",
        "description",
        "approval",
        "manpower",
        "weightAndBalance",
        "electricalLoadData",
        "softwareAccomplishmentSummary",
        "referencedDocumentation",
        "documentationAffected",
        "industrySupportInformation",
        "interchangeability",
    ] {
        properties[field] = nullable("string");
    }

    json!({ "type": "object", "properties": properties })
}

fn spare() -> Value {
    json!({
        "type": "object",
        "properties": {
            "partNumber": nullable("string"),
            "serialNumber": nullable("string"),
            "quantity": nullable("integer"),
            "location": nullable("string"),
            "remarks": nullable("string")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_schema_nests_spares_under_document_info() {
        let schema = leap_schema();
        let info = &schema.parameters["properties"]["documentInfo"]["properties"];

        assert_eq!(schema.name, LEAP_FUNCTION_NAME);
        assert_eq!(
            info["materialInformation"]["properties"]["listOfRemovedSpares"]["items"]["properties"]
                ["location"]["type"],
            json!(["string", "null"])
        );
        assert_eq!(
            info["planningInformation"]["properties"]["interchangeability"]["type"],
            json!(["string", "null"])
        );
        assert_eq!(
            info["planningInformation"]["properties"]["applicability"]["properties"]
                ["engineModels"]["type"],
            json!(["array", "null"])
        );
    }
}
