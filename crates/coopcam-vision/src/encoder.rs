//! 프레임 인코더.
//!
//! 긴 변 상한 다운스케일(fast_image_resize) + WebP 손실 인코딩 + base64.
//! 프레임은 매 사이클 새로 만들어 쓰고 버린다 — 캐싱 없음.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use coopcam_core::error::CoreError;
use coopcam_core::models::frame::EncodedFrame;
use fast_image_resize::{images::Image as FirImage, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// WebP MIME 타입
const WEBP_MIME: &str = "image/webp";

/// 긴 변이 `max_edge`를 넘으면 종횡비를 유지하며 축소한다.
///
/// 이미 상한 이하면 원본을 그대로 반환.
pub fn downscale_to_edge(
    image: &DynamicImage,
    max_edge: u32,
) -> Result<DynamicImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());
    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Internal("소스 이미지 크기 0".to_string()));
    }
    if max_edge == 0 {
        return Err(CoreError::Config("max_edge는 1 이상이어야 함".to_string()));
    }

    let longest = src_w.max(src_h);
    if longest <= max_edge {
        return Ok(image.clone());
    }

    // 종횡비 유지 축소 (최소 1픽셀 보장)
    let scale = max_edge as f64 / longest as f64;
    let dst_w = ((src_w as f64 * scale).round() as u32).max(1);
    let dst_h = ((src_h as f64 * scale).round() as u32).max(1);

    fast_resize(image, dst_w, dst_h)
}

/// fast_image_resize 기반 고속 리사이즈 (Bilinear)
fn fast_resize(image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());
    let src_rgba = image.to_rgba8();

    let src_image = FirImage::from_vec_u8(
        src_w,
        src_h,
        src_rgba.into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, fast_image_resize::PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(
        fast_image_resize::FilterType::Bilinear,
    ));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("결과 이미지 생성 실패".to_string()))?;

    debug!("다운스케일: {}x{} → {}x{}", src_w, src_h, width, height);

    Ok(DynamicImage::ImageRgba8(result))
}

/// 캡처 이미지를 전송용 프레임으로 인코딩.
///
/// 다운스케일 → WebP 손실 압축 → base64. 긴 변은 `max_edge`를 넘지 않는다.
pub fn encode_frame(
    image: &DynamicImage,
    max_edge: u32,
    quality: u8,
) -> Result<EncodedFrame, CoreError> {
    let scaled = downscale_to_edge(image, max_edge)?;
    let rgba = scaled.to_rgba8();
    let (w, h) = (rgba.width(), rgba.height());

    let encoder = webp::Encoder::from_rgba(&rgba, w, h);
    let encoded = encoder.encode(quality.min(100) as f32);
    let data = encoded.to_vec();
    let base64 = B64.encode(&data);

    debug!(
        "프레임 인코딩: {}x{} → {} bytes (품질 {})",
        w,
        h,
        data.len(),
        quality
    );

    Ok(EncodedFrame {
        data,
        base64,
        mime: WEBP_MIME.to_string(),
        quality,
        width: w,
        height: h,
    })
}
