//! 비전 제공자 클라이언트.
//!
//! 프레임 1장 + 고정 지시 프롬프트를 OpenAI 호환 `/v1/chat/completions`로
//! 전송하고 응답 텍스트에서 분석 결과 JSON을 추출한다.
//! 사이클당 정확히 1회 호출 — 재시도/백오프/rate limit 없음.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use coopcam_core::config::AnalyzerConfig;
use coopcam_core::error::CoreError;
use coopcam_core::models::analysis::AnalysisResult;
use coopcam_core::models::frame::EncodedFrame;
use coopcam_core::ports::CoopAnalyzer;

use crate::extract::extract_json_object;

/// 고정 지시 프롬프트.
///
/// 사용자 입력으로 파라미터화되지 않는다. 응답 JSON의 필드명/중첩 구조,
/// 허용된 닭 이름과 상태값의 닫힌 집합을 명시한다.
const INSTRUCTION_PROMPT: &str = r#"You are the commentator for a live chicken coop camera feed. Look at this frame from the coop and report what you see.

Respond with a single JSON object using EXACTLY this structure:
{
  "temperature": <number, estimated coop temperature in F>,
  "humidity": <number, estimated humidity percent>,
  "eggCount": <number of visible eggs>,
  "behaviors": [{"label": "<behavior name>", "value": "<short reading>", "status": "<good|watch|alert>"}],
  "events": [{"time": "<HH:MM>", "text": "<event description, may use **bold** for emphasis>"}],
  "hens": [{"name": "<hen name>", "state": "<active|resting|alert>", "activity": "<what she is doing>"}]
}

The hens are named exactly: Henrietta, Clucky, Nugget, Dumpling, Peep.
Use only those names. State must be one of: active, resting, alert.

Be creative and entertaining in the text fields — this feeds a live overlay
for viewers. Respond with the JSON object only."#;

/// 원격 비전 분석기 — `CoopAnalyzer` 포트 구현
///
/// 지원 API: OpenAI 호환 `POST /v1/chat/completions` + image_url content block.
///
/// **보안**: API 키는 설정/환경변수에서 로드, 메모리에만 유지.
#[derive(Debug)]
pub struct RemoteVisionAnalyzer {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 엔드포인트 URL
    endpoint: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
    /// 모델 이름
    model: String,
    /// 응답 최대 토큰 수
    max_tokens: u32,
}

impl RemoteVisionAnalyzer {
    /// 새 RemoteVisionAnalyzer 생성
    pub fn new(config: &AnalyzerConfig) -> Result<Self, CoreError> {
        if config.api_key.is_empty() {
            return Err(CoreError::Config(
                "비전 API 키 미설정. COOPCAM_API_KEY 환경변수를 지정하세요.".into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout = config.timeout_secs,
            "RemoteVisionAnalyzer 초기화"
        );

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// 응답 본문에서 모델 출력 텍스트 추출 (OpenAI 형식)
    fn response_text(body: &str) -> Result<String, CoreError> {
        let response: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| CoreError::Analysis(format!("제공자 응답 JSON 파싱 실패: {}", e)))?;

        response
            .get("choices")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                CoreError::Analysis("제공자 응답에서 텍스트를 찾을 수 없음".to_string())
            })
    }
}

#[async_trait]
impl CoopAnalyzer for RemoteVisionAnalyzer {
    async fn analyze(&self, frame: &EncodedFrame) -> Result<AnalysisResult, CoreError> {
        debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            frame_bytes = frame.data.len(),
            "비전 API 호출"
        );

        let request_body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    {
                        "type": "text",
                        "text": INSTRUCTION_PROMPT
                    },
                    {
                        "type": "image_url",
                        "image_url": { "url": frame.data_uri() }
                    }
                ]
            }]
        });

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CoreError::Analysis(format!("비전 API 호출 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Analysis(format!("비전 API 응답 읽기 실패: {}", e)))?;

        if !status.is_success() {
            warn!(status = %status, "비전 API 오류 응답");
            return Err(CoreError::Analysis(format!(
                "비전 API 오류 ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let text = Self::response_text(&body)?;
        let result = extract_json_object(&text)?;

        debug!("비전 분석 완료");

        Ok(result)
    }
}
