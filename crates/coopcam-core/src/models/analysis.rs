//! 분석 결과 모델.
//!
//! 모델 응답의 JSON 오브젝트를 스키마 검증 없이 그대로 전달한다.
//! 필드 누락/추가는 다운스트림 오버레이가 방어적으로 처리한다
//! (프롬프트가 형태를 지시하지만 강제하지는 않는다).

/// 분석 결과 — 사이클 1회의 관찰 기록.
///
/// 비전 모델이 반환한 JSON 오브젝트 passthrough.
/// 구독자에게 브로드캐스트되는 페이로드이자 수동 트리거 응답의 본체.
pub type AnalysisResult = serde_json::Value;
