//! Essay evaluation types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The four rubric sub-scores as returned by the examiner model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RubricScores {
    pub task_response: f64,
    pub coherence_and_cohesion: f64,
    pub lexical_resource: f64,
    pub grammatical_range_and_accuracy: f64,
}

impl RubricScores {
    /// Sub-scores in rubric order
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.task_response,
            self.coherence_and_cohesion,
            self.lexical_resource,
            self.grammatical_range_and_accuracy,
        ]
    }

    /// Every sub-score must be a finite band between 0 and 9
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            "task_response",
            "coherence_and_cohesion",
            "lexical_resource",
            "grammatical_range_and_accuracy",
        ];
        for (name, value) in names.iter().zip(self.as_array()) {
            if !value.is_finite() || !(0.0..=9.0).contains(&value) {
                return Err(format!("{} score {} is outside 0-9", name, value));
            }
        }
        Ok(())
    }
}

/// Sub-scores plus the derived overall band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub overall_band: f64,
    pub task_response: f64,
    pub coherence_and_cohesion: f64,
    pub lexical_resource: f64,
    pub grammatical_range_and_accuracy: f64,
}

impl From<RubricScores> for Score {
    fn from(scores: RubricScores) -> Self {
        Self {
            overall_band: super::band::overall_band(&scores),
            task_response: scores.task_response,
            coherence_and_cohesion: scores.coherence_and_cohesion,
            lexical_resource: scores.lexical_resource,
            grammatical_range_and_accuracy: scores.grammatical_range_and_accuracy,
        }
    }
}

/// Per-criterion feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub task_response: String,
    pub coherence_and_cohesion: String,
    pub lexical_resource: String,
    pub grammatical_range_and_accuracy: String,
}

/// What the examiner model returns
///
/// `essay` is only present for image input, where the model transcribes the
/// essay it scored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assessment {
    pub topic: String,
    #[serde(default)]
    pub essay: Option<String>,
    pub scores: RubricScores,
    pub feedback: Feedback,
    pub suggestions: Vec<String>,
}

/// Evaluation returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EssayEvaluation {
    pub topic: String,
    pub word_count: usize,
    pub score: Score,
    pub feedback: Feedback,
    pub suggestions: Vec<String>,
    pub original_essay: String,
    pub error: Option<String>,
}

impl EssayEvaluation {
    /// Attach the essay and compute the derived fields
    pub fn from_assessment(assessment: Assessment, essay_text: impl Into<String>) -> Self {
        let original_essay = essay_text.into();
        Self {
            topic: assessment.topic,
            word_count: super::band::word_count(&original_essay),
            score: Score::from(assessment.scores),
            feedback: assessment.feedback,
            suggestions: assessment.suggestions,
            original_essay,
            error: None,
        }
    }
}

/// An uploaded essay image
#[derive(Debug, Clone)]
pub struct EssayImage {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

impl EssayImage {
    pub fn new(bytes: Bytes, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// MIME type sent to the vision model, `image/jpeg` unless the upload says otherwise
    pub fn mime_type(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if ct.starts_with("image/") => ct,
            _ => "image/jpeg",
        }
    }

    /// Inline `data:` URL carrying the base64-encoded image
    pub fn data_url(&self) -> String {
        use base64::{Engine as _, engine::general_purpose::STANDARD};
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(&self.bytes))
    }
}
