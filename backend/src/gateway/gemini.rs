use log::{error, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use shared::{ActivitySuggestion, RewardSuggestion};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Error)]
enum SuggestionError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model returned no content")]
    EmptyResponse,
    #[error("could not parse suggestions: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gateway to the Gemini API for activity and reward suggestions
#[derive(Clone)]
pub struct SuggestionGateway {
    api_key: Option<String>,
    base_url: String,
    model: String,
    http: Client,
}

impl SuggestionGateway {
    /// Create a gateway with an explicit (possibly absent) API key
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.is_empty()),
            base_url: GEMINI_BASE_URL.to_string(),
            model: GEMINI_MODEL.to_string(),
            http: Client::new(),
        }
    }

    /// Create a gateway reading the API key from the environment
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok())
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a credential is configured and live calls will be made
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Suggest daily activities for the given kids.
    ///
    /// Without a credential this returns the canned list and makes no
    /// network call; on any other failure it returns an empty list.
    pub async fn suggest_activities(&self, kid_names: &[String]) -> Vec<ActivitySuggestion> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("No API key provided for Gemini");
                return fallback_activities();
            }
        };

        let prompt = format!(
            "Gợi ý 5 hoạt động hàng ngày thú vị, bổ ích cho trẻ em tên là {}. \
             Các hoạt động nên đơn giản, dễ thực hiện tại nhà và giúp trẻ phát triển thói quen tốt.",
            kid_names.join(" và ")
        );
        let schema = json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING", "description": "Tên hoạt động ngắn gọn" },
                    "icon": { "type": "STRING", "description": "Một emoji phù hợp" },
                    "reason": { "type": "STRING", "description": "Lý do tại sao hoạt động này tốt" }
                },
                "required": ["title", "icon", "reason"]
            }
        });

        match self.fetch_suggestions(&api_key, &prompt, schema).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                error!("Error fetching activity suggestions: {}", e);
                Vec::new()
            }
        }
    }

    /// Suggest rewards for a kid who reached the given score.
    ///
    /// Same fallback policy as [`Self::suggest_activities`], with its own
    /// canned content.
    pub async fn suggest_rewards(&self, score: i64, kid_name: &str) -> Vec<RewardSuggestion> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("No API key provided for Gemini");
                return fallback_rewards();
            }
        };

        let prompt = format!(
            "Bé {} vừa đạt được {} điểm rèn luyện. \
             Hãy gợi ý 3 phần thưởng sáng tạo, phù hợp với trẻ em để khích lệ bé.",
            kid_name, score
        );
        let schema = json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING", "description": "Tên phần thưởng" },
                    "description": { "type": "STRING", "description": "Mô tả chi tiết hấp dẫn" },
                    "pointsCost": { "type": "NUMBER", "description": "Số điểm cần đổi (thường là 100)" }
                },
                "required": ["title", "description", "pointsCost"]
            }
        });

        match self.fetch_suggestions(&api_key, &prompt, schema).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                error!("Error fetching reward suggestions: {}", e);
                Vec::new()
            }
        }
    }

    /// Ask the model for schema-validated JSON and parse the result list
    async fn fetch_suggestions<T: DeserializeOwned>(
        &self,
        api_key: &str,
        prompt: &str,
        response_schema: Value,
    ) -> Result<Vec<T>, SuggestionError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema
            }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(SuggestionError::EmptyResponse)?;

        Ok(serde_json::from_str(&text)?)
    }
}

/// Canned activity suggestions used when no credential is configured
fn fallback_activities() -> Vec<ActivitySuggestion> {
    vec![
        ActivitySuggestion {
            title: "Đọc sách cùng mẹ".to_string(),
            icon: "📚".to_string(),
            reason: "Phát triển tư duy ngôn ngữ".to_string(),
        },
        ActivitySuggestion {
            title: "Tưới cây".to_string(),
            icon: "🌱".to_string(),
            reason: "Yêu thiên nhiên".to_string(),
        },
        ActivitySuggestion {
            title: "Dọn đồ chơi".to_string(),
            icon: "🧸".to_string(),
            reason: "Rèn luyện tính gọn gàng".to_string(),
        },
    ]
}

/// Canned reward suggestions used when no credential is configured
fn fallback_rewards() -> Vec<RewardSuggestion> {
    vec![
        RewardSuggestion {
            title: "Đi ăn kem".to_string(),
            description: "Bé được chọn vị kem yêu thích".to_string(),
            points_cost: 100,
        },
        RewardSuggestion {
            title: "Mua đồ chơi nhỏ".to_string(),
            description: "Món đồ chơi dưới 50k".to_string(),
            points_cost: 100,
        },
        RewardSuggestion {
            title: "Đi công viên".to_string(),
            description: "Cả nhà cùng đi dạo công viên".to_string(),
            points_cost: 100,
        },
    ]
}
