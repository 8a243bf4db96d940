//! 모델 응답 텍스트에서 JSON 오브젝트 추출.
//!
//! 모델은 마크다운 코드 블록이나 앞뒤 설명을 섞어 응답하는 일이 잦다.
//! 첫 `{`부터 **마지막** `}`까지의 최대 구간을 잘라 strict 디코딩한다.

use coopcam_core::error::CoreError;
use coopcam_core::models::analysis::AnalysisResult;

/// 텍스트에서 첫 `{` ~ 마지막 `}` 구간을 JSON으로 디코딩.
///
/// - `{`/`}` 쌍이 없으면 `CoreError::Parse` ("구조화된 데이터 없음")
/// - 구간이 올바른 JSON이 아니면 `CoreError::Parse` (디코딩 에러 포함)
pub fn extract_json_object(text: &str) -> Result<AnalysisResult, CoreError> {
    let start = text.find('{');
    let end = text.rfind('}');

    let span = match (start, end) {
        (Some(s), Some(e)) if s <= e => &text[s..=e],
        _ => {
            return Err(CoreError::Parse(
                "응답에 구조화된 데이터 없음".to_string(),
            ))
        }
    };

    serde_json::from_str(span).map_err(|e| {
        CoreError::Parse(format!(
            "응답 JSON 디코딩 실패: {} (raw: {})",
            e,
            span.chars().take(200).collect::<String>()
        ))
    })
}
