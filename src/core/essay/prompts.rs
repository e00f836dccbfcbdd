//! Examiner prompts and structured-output schemas

use serde_json::{Value, json};

pub const EXAMINER_SYSTEM_PROMPT: &str = "\
You are an IELTS examiner. Your task is to analyze IELTS Writing Task 2 responses \
and evaluate them based on official band descriptors.

Each input contains:
- A topic/question at the beginning (if available).
- A writing response following the topic.

Your tasks:
1. Identify the topic/question.
   - If a clear topic/question is provided, extract it from the beginning of the input.
   - If no topic is explicitly mentioned, generate a relevant topic based on the essay content.
2. Evaluate the essay based on IELTS criteria:
   - Task Response: Does the essay fully address the topic? Are arguments well-developed?
   - Coherence & Cohesion: Is the essay logically structured with clear paragraphing and linking words?
   - Lexical Resource: How rich and precise is the vocabulary?
   - Grammatical Range & Accuracy: Are sentences grammatically correct with varied structures?
3. Return JSON with:
   - topic: the extracted or generated topic/question.
   - scores: band scores (0-9, in steps of 0.5) for each criterion.
   - feedback: detailed feedback for each criterion.
   - suggestions: actionable improvements.";

const EVALUATION_REQUEST: &str = "\
Please evaluate my IELTS writing task. The input contains:
1. Topic/Question (first part of the text, if available).
2. Essay Response (following text).

Your task:
- Identify and extract the topic/question if present.
- If no topic is found, generate a relevant topic based on the essay.
- Evaluate the essay content based on the official IELTS writing band descriptors.
- Provide structured scores, feedback, and suggestions for improvement.";

pub const IMAGE_SYSTEM_PROMPT: &str = "\
You are an advanced IELTS evaluator specializing in text extraction from images. \
Your task is to accurately extract the IELTS Writing Task 2 topic and essay from the \
provided image and evaluate it. Respond in strict JSON with no additional explanations, \
comments, or formatting outside of JSON. Put the extracted essay text, verbatim, in `essay`.";

pub const MULTI_IMAGE_PROMPT: &str = "\
Extract and evaluate the essays in these images based on IELTS criteria. The images are \
consecutive pages of one submission: combine the extracted text, in order, into `essay` \
and evaluate it as a whole.";

/// User message for a typed essay
pub fn text_evaluation_prompt(essay_text: &str) -> String {
    format!(
        "{}\n\nHere is the full input (topic + essay):\n---\n{}\n---",
        EVALUATION_REQUEST, essay_text
    )
}

/// User message text accompanying a single essay image
pub fn image_evaluation_prompt() -> &'static str {
    EVALUATION_REQUEST
}

/// JSON schema for the examiner reply
///
/// With `include_essay` the model must also return the essay text it read
/// from the image.
pub fn assessment_schema(include_essay: bool) -> Value {
    let criteria = [
        "task_response",
        "coherence_and_cohesion",
        "lexical_resource",
        "grammatical_range_and_accuracy",
    ];

    let object_of = |kind: &str| {
        let properties: serde_json::Map<String, Value> = criteria
            .iter()
            .map(|name| (name.to_string(), json!({ "type": kind })))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": criteria,
            "additionalProperties": false,
        })
    };

    let mut properties = serde_json::Map::new();
    properties.insert("topic".to_string(), json!({ "type": "string" }));
    if include_essay {
        properties.insert("essay".to_string(), json!({ "type": "string" }));
    }
    properties.insert("scores".to_string(), object_of("number"));
    properties.insert("feedback".to_string(), object_of("string"));
    properties.insert(
        "suggestions".to_string(),
        json!({ "type": "array", "items": { "type": "string" } }),
    );

    let required: Vec<String> = properties.keys().cloned().collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}
