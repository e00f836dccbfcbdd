//! Test fixtures

use serde_json::{Value, json};

/// Boundary used by [`multipart_form`]
pub const BOUNDARY: &str = "examiner-gateway-boundary";

/// A part of a multipart form
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Encode a multipart/form-data body, returning the content type and bytes
pub fn multipart_form(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

/// Examiner reply with the given sub-scores (TR, CC, LR, GRA)
pub fn assessment(scores: [f64; 4], essay: Option<&str>) -> Value {
    let mut value = json!({
        "topic": "Some people think that all university students should study whatever they like.",
        "scores": {
            "task_response": scores[0],
            "coherence_and_cohesion": scores[1],
            "lexical_resource": scores[2],
            "grammatical_range_and_accuracy": scores[3]
        },
        "feedback": {
            "task_response": "Both views are discussed but the opinion is unclear.",
            "coherence_and_cohesion": "Paragraphs are well organised.",
            "lexical_resource": "Some less common vocabulary used accurately.",
            "grammatical_range_and_accuracy": "Frequent article errors."
        },
        "suggestions": [
            "State your opinion in the introduction.",
            "Review article usage."
        ]
    });
    if let Some(essay) = essay {
        value["essay"] = json!(essay);
    }
    value
}
