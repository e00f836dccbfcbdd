//! IELTS Writing Task 2 evaluation
//!
//! Essays arrive as text or as photographed pages. Either way a language
//! model extracts the topic and scores the four rubric criteria; the word
//! count and overall band are always computed here, never taken from the
//! model.

mod band;
mod prompts;
mod types;

pub use band::{overall_band, word_count};
pub use types::{
    Assessment, EssayEvaluation, EssayImage, Feedback, RubricScores, Score,
};

use crate::config::OpenAIConfig;
use crate::core::providers::{
    ChatMessage, ChatRequest, ContentPart, LanguageModel, ResponseFormat, call_with_timeout,
};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SCHEMA_NAME: &str = "ielts_writing_evaluation";

const TEXT_FAILURE: &str = "Failed to parse the essay evaluation.";
const IMAGE_FAILURE: &str = "Failed to extract topic and essay from image.";
const MULTI_IMAGE_FAILURE: &str = "Failed to process the images.";

/// Essay evaluator backed by a chat-capable language model
pub struct EssayEvaluator {
    language_model: Arc<dyn LanguageModel>,
    evaluation_model: String,
    vision_model: String,
    multi_image_max_tokens: Option<u32>,
    timeout: Duration,
}

impl EssayEvaluator {
    /// Create a new evaluator
    pub fn new(
        language_model: Arc<dyn LanguageModel>,
        config: &OpenAIConfig,
        timeout: Duration,
    ) -> Self {
        Self {
            language_model,
            evaluation_model: config.evaluation_model.clone(),
            vision_model: config.vision_model.clone(),
            multi_image_max_tokens: config.multi_image_max_tokens,
            timeout,
        }
    }

    /// Evaluate a typed essay (topic optionally on the first lines)
    pub async fn evaluate_text(&self, essay_text: &str) -> Result<EssayEvaluation> {
        if essay_text.trim().is_empty() {
            return Err(GatewayError::bad_request("Essay text cannot be empty."));
        }

        info!(
            model = %self.evaluation_model,
            words = word_count(essay_text),
            "Evaluating essay text"
        );

        let request = ChatRequest::new(
            self.evaluation_model.clone(),
            vec![
                ChatMessage::system(prompts::EXAMINER_SYSTEM_PROMPT),
                ChatMessage::user(prompts::text_evaluation_prompt(essay_text)),
            ],
        )
        .with_response_format(ResponseFormat::json_schema(
            SCHEMA_NAME,
            prompts::assessment_schema(false),
        ));

        let assessment = self.assess(request, TEXT_FAILURE).await?;
        Ok(EssayEvaluation::from_assessment(assessment, essay_text))
    }

    /// Evaluate a photographed essay
    pub async fn evaluate_image(&self, image: EssayImage) -> Result<EssayEvaluation> {
        if image.bytes.is_empty() {
            return Err(GatewayError::bad_request("Uploaded image is empty."));
        }

        info!(
            model = %self.vision_model,
            bytes = image.bytes.len(),
            mime = image.mime_type(),
            "Evaluating essay image"
        );

        let request = ChatRequest::new(
            self.vision_model.clone(),
            vec![
                ChatMessage::system(prompts::IMAGE_SYSTEM_PROMPT),
                ChatMessage::user_parts(vec![
                    ContentPart::text(prompts::image_evaluation_prompt()),
                    ContentPart::image_url(image.data_url()),
                ]),
            ],
        )
        .with_response_format(ResponseFormat::json_schema(
            SCHEMA_NAME,
            prompts::assessment_schema(true),
        ));

        let assessment = self.assess(request, IMAGE_FAILURE).await?;
        Self::with_extracted_essay(assessment, IMAGE_FAILURE)
    }

    /// Evaluate several pages of one essay in a single model call
    ///
    /// Callers drop empty uploads before getting here.
    pub async fn evaluate_images(&self, images: Vec<EssayImage>) -> Result<EssayEvaluation> {
        if images.is_empty() {
            return Err(GatewayError::bad_request("At least one image is required."));
        }

        info!(
            model = %self.vision_model,
            images = images.len(),
            "Evaluating essay images"
        );

        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(ContentPart::text(prompts::MULTI_IMAGE_PROMPT));
        parts.extend(images.iter().map(|image| ContentPart::image_url(image.data_url())));

        let request = ChatRequest::new(self.vision_model.clone(), vec![ChatMessage::user_parts(parts)])
            .with_response_format(ResponseFormat::json_schema(
                SCHEMA_NAME,
                prompts::assessment_schema(true),
            ))
            .with_max_tokens(self.multi_image_max_tokens);

        let assessment = self.assess(request, MULTI_IMAGE_FAILURE).await?;
        Self::with_extracted_essay(assessment, MULTI_IMAGE_FAILURE)
    }

    async fn assess(&self, request: ChatRequest, failure: &str) -> Result<Assessment> {
        let completion = call_with_timeout(
            "essay evaluation",
            self.timeout,
            self.language_model.chat(request),
        )
        .await?;

        debug!(model = %completion.model, chars = completion.content.len(), "Examiner replied");
        parse_assessment(&completion.content, failure)
    }

    fn with_extracted_essay(mut assessment: Assessment, failure: &str) -> Result<EssayEvaluation> {
        match assessment.essay.take() {
            Some(essay) => Ok(EssayEvaluation::from_assessment(assessment, essay)),
            None => {
                warn!("Examiner reply has no extracted essay");
                Err(GatewayError::upstream_format(failure))
            }
        }
    }
}

/// Decode and range-check an examiner reply
pub(crate) fn parse_assessment(content: &str, failure: &str) -> Result<Assessment> {
    let assessment: Assessment = serde_json::from_str(content).map_err(|e| {
        warn!(error = %e, "Examiner reply is not valid evaluation JSON");
        GatewayError::upstream_format(failure)
    })?;

    assessment.scores.validate().map_err(|reason| {
        warn!(%reason, "Examiner reply has out-of-range scores");
        GatewayError::upstream_format(failure)
    })?;

    Ok(assessment)
}
