//! 인코딩된 프레임 모델.

/// 인코딩된 프레임 — 다운스케일 + 손실 압축된 이미지 1장.
///
/// 매 사이클 새로 생성되고 사용 후 폐기된다. 캐싱 없음.
/// `base64`는 JSON 요청 본문 전송용 텍스트 인코딩.
#[derive(Debug, Clone)]
pub struct EncodedFrame {
    /// 압축된 이미지 바이트
    pub data: Vec<u8>,
    /// `data`의 base64 인코딩 (표준 알파벳)
    pub base64: String,
    /// MIME 타입 (예: "image/webp")
    pub mime: String,
    /// 손실 압축 품질 (0~100)
    pub quality: u8,
    /// 인코딩 후 너비 (픽셀)
    pub width: u32,
    /// 인코딩 후 높이 (픽셀)
    pub height: u32,
}

impl EncodedFrame {
    /// 비전 API image content block용 data URI 반환
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64)
    }

    /// 긴 변 픽셀 수
    pub fn longest_edge(&self) -> u32 {
        self.width.max(self.height)
    }
}
