use async_trait::async_trait;
use bulletin::errors::PromptError;
use bulletin::providers::ai::AiProvider;
use bulletin::schemas::FunctionSchema;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// One recorded `call_function` invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub function_name: String,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs the arguments returned when `function_name` is called.
    pub fn add_response(&self, function_name: &str, arguments: Value) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(function_name.to_string(), arguments);
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn call_function(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        function: &FunctionSchema,
    ) -> Result<Value, PromptError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            function_name: function.name.clone(),
        });

        let responses = self.responses.lock().unwrap();
        responses.get(&function.name).cloned().ok_or_else(|| {
            PromptError::AiApi(format!(
                "MockAiProvider: No response programmed for function '{}'",
                function.name
            ))
        })
    }
}

// --- Fixtures ---

/// A CFM answer with two parts and one configuration change.
pub fn sample_cfm_arguments() -> Value {
    json!({
        "documentInfo": {
            "documentTitle": "HPT Stage 1 Blade Replacement",
            "serviceBulletinNumber": "CFM56-5B S/B 72-0931",
            "revisionNumber": "2",
            "issueDate": "2021-03-04",
            "revisionDate": null,
            "ataChapter": "72-00",
            "engineModels": ["CFM56-5B4/3", "CFM56-5B6/3"],
            "category": "Category 3",
            "complianceType": "Optional"
        },
        "reason": {
            "objective": "Replace blades",
            "condition": "Blade erosion"
        },
        "compliance": { "manpowerHours": 12.5, "weightImpact": 0 },
        "materialInformation": {
            "parts": [
                { "partNumber": "2123M45P01", "quantity": 80, "unitCost": 1520.0, "currency": "USD" },
                { "partNumber": "9876M11G02", "quantity": 1, "notes": "Kit" }
            ]
        },
        "configurationChanges": [
            { "oldConfig": "2123M45P00", "newConfig": "2123M45P01", "notes": null }
        ],
        "approval": "EASA approved",
        "tooling": ["856A1130", null]
    })
}

/// A LEAP answer shaped exactly as its schema describes.
pub fn sample_leap_arguments() -> Value {
    json!({
        "documentInfo": {
            "documentName": "LEAP-1A-72-00-0123",
            "title": "Fan Blade Inspection",
            "date": "2022-11-30",
            "revisionInformation": [{
                "revisionReason": [{ "issueNumber": "001", "revisionReason": "Initial" }],
                "revisionHistory": [{ "issueNumber": "001", "issueDate": "2022-11-30" }]
            }],
            "summary": { "reason": "Crack findings" },
            "planningInformation": {
                "applicability": { "engineType": "LEAP-1A", "engineModels": ["LEAP-1A26", "LEAP-1A32"] },
                "reason": { "objective": "Inspect fan blades" },
                "compliance": { "category": "Recommended", "impact": null },
                "manpower": "4 hours"
            },
            "materialInformation": {
                "listOfSpares": [
                    { "partNumber": "F123", "quantity": 2, "location": "Fan", "remarks": null },
                    { "partNumber": "F456", "serialNumber": "SN-1", "quantity": 1 }
                ],
                "listOfRemovedSpares": []
            }
        }
    })
}

// --- PDF Fixtures ---

/// Builds a minimal uncompressed PDF with one page per entry of `pages`.
///
/// Lines inside a page are separated by `\n` and rendered with `T*`, so text
/// extraction sees a newline operator between them.
pub fn build_text_pdf(pages: &[&str]) -> Vec<u8> {
    let page_count = pages.len();
    let mut objects: Vec<Vec<u8>> = Vec::new();

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect();
    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .into_bytes(),
    );
    objects.push(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec());

    for (i, text) in pages.iter().enumerate() {
        let content_id = 5 + 2 * i;
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );

        let mut stream = String::from("BT /F1 12 Tf 14 TL 72 720 Td");
        for (n, line) in text.split('\n').filter(|_| !text.is_empty()).enumerate() {
            if n > 0 {
                stream.push_str(" T*");
            }
            stream.push_str(&format!(" ({}) Tj", escape_pdf_string(line)));
        }
        stream.push_str(" ET");
        objects.push(
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            )
            .into_bytes(),
        );
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
