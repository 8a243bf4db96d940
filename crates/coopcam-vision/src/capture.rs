//! 스크린 캡처.
//!
//! xcap 기반 주 모니터 캡처 + 설정 영역 크롭.

use coopcam_core::config::CaptureRegion;
use coopcam_core::error::CoreError;
use image::DynamicImage;
use tracing::debug;
use xcap::Monitor;

/// 스크린 캡처 — xcap 기반
pub struct ScreenCapture;

impl ScreenCapture {
    /// 새 캡처 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 주 모니터 스크린 캡처
    ///
    /// 주 모니터가 없으면 첫 번째 모니터로 폴백.
    pub fn capture_primary(&self) -> Result<DynamicImage, CoreError> {
        let monitors = Monitor::all()
            .map_err(|e| CoreError::Capture(format!("모니터 목록 조회 실패: {e}")))?;

        let monitor = monitors
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .or_else(|| Monitor::all().ok()?.into_iter().next())
            .ok_or_else(|| CoreError::Capture("모니터를 찾을 수 없음".to_string()))?;

        let image = monitor
            .capture_image()
            .map_err(|e| CoreError::Capture(format!("스크린 캡처 실패: {e}")))?;

        debug!("스크린 캡처 완료: {}x{}", image.width(), image.height());

        Ok(DynamicImage::ImageRgba8(image))
    }

    /// 주 모니터 캡처 후 설정 영역 크롭 (영역 없으면 전체 화면)
    pub fn capture(&self, region: Option<&CaptureRegion>) -> Result<DynamicImage, CoreError> {
        let full = self.capture_primary()?;
        match region {
            Some(r) => crop_region(&full, r),
            None => Ok(full),
        }
    }
}

impl Default for ScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// 캡처 영역 크롭.
///
/// 영역이 이미지 경계를 벗어나면 경계에 맞게 잘라낸다.
/// 교집합이 비면 `CoreError::Capture`.
pub fn crop_region(image: &DynamicImage, region: &CaptureRegion) -> Result<DynamicImage, CoreError> {
    let (img_w, img_h) = (image.width(), image.height());

    if region.x >= img_w || region.y >= img_h {
        return Err(CoreError::Capture(format!(
            "캡처 영역이 화면 밖: 영역 원점 ({}, {}), 화면 {}x{}",
            region.x, region.y, img_w, img_h
        )));
    }

    let width = region.width.min(img_w - region.x);
    let height = region.height.min(img_h - region.y);

    if width == 0 || height == 0 {
        return Err(CoreError::Capture("캡처 영역 크기 0".to_string()));
    }

    Ok(image.crop_imm(region.x, region.y, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn make_image(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255])))
    }

    #[test]
    fn crop_inside_bounds() {
        let img = make_image(800, 600);
        let region = CaptureRegion {
            x: 100,
            y: 50,
            width: 320,
            height: 240,
        };
        let cropped = crop_region(&img, &region).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (320, 240));
    }

    #[test]
    fn crop_clamps_to_image_edge() {
        let img = make_image(800, 600);
        let region = CaptureRegion {
            x: 700,
            y: 500,
            width: 320,
            height: 240,
        };
        let cropped = crop_region(&img, &region).unwrap();
        assert_eq!((cropped.width(), cropped.height()), (100, 100));
    }

    #[test]
    fn crop_outside_bounds_fails() {
        let img = make_image(800, 600);
        let region = CaptureRegion {
            x: 900,
            y: 0,
            width: 100,
            height: 100,
        };
        let err = crop_region(&img, &region).unwrap_err();
        assert!(matches!(err, CoreError::Capture(_)));
    }

    #[test]
    fn zero_size_region_fails() {
        let img = make_image(800, 600);
        let region = CaptureRegion {
            x: 0,
            y: 0,
            width: 0,
            height: 240,
        };
        assert!(crop_region(&img, &region).is_err());
    }
}
