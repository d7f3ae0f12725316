//! 오퍼 생성/수정 요청 DTO
//!
//! 오퍼 도메인의 HTTP 요청 본문 구조와 필드 제약을 정의합니다.
//! 제약 위반은 위반된 필드 전체가 집계되어 400 응답으로 변환됩니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::offers::offer::{City, Coordinates, Facility, Housing};

/// 새 오퍼 생성을 위한 요청 DTO
///
/// 소유자는 요청 본문이 아닌 인증된 사용자로부터 결정됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    /// 오퍼 이름 (10-100자)
    #[validate(length(min = 10, max = 100, message = "이름은 10-100자 사이여야 합니다"))]
    pub name: String,

    /// 상세 설명 (20-1024자)
    #[validate(length(min = 20, max = 1024, message = "설명은 20-1024자 사이여야 합니다"))]
    pub description: String,

    /// 게시 일시 (ISO-8601)
    pub publication_date: DateTime<Utc>,

    /// 도시
    pub city: City,

    /// 미리보기 이미지 경로 (최대 256자)
    #[validate(length(max = 256, message = "미리보기 경로는 최대 256자입니다"))]
    pub preview_image: String,

    /// 갤러리 이미지 경로 (정확히 6장)
    #[validate(length(min = 6, max = 6, message = "이미지는 정확히 6장이어야 합니다"))]
    pub images: Vec<String>,

    /// 프리미엄 오퍼 여부
    pub premium: bool,

    /// 평점 (1.0-5.0)
    #[validate(range(min = 1.0, max = 5.0, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: f64,

    /// 숙소 유형
    pub housing_type: Housing,

    /// 방 개수 (1-8)
    #[validate(range(min = 1, max = 8, message = "방 개수는 1-8 사이여야 합니다"))]
    pub room_count: i32,

    /// 수용 가능 인원 (1-10)
    #[validate(range(min = 1, max = 10, message = "수용 인원은 1-10 사이여야 합니다"))]
    pub guest_count: i32,

    /// 1박 비용 (100-100000)
    #[validate(range(min = 100, max = 100000, message = "비용은 100-100000 사이여야 합니다"))]
    pub cost: i64,

    /// 편의시설 목록 (최소 1개)
    #[validate(length(min = 1, message = "편의시설은 최소 1개 이상이어야 합니다"))]
    pub facilities: Vec<Facility>,

    /// 숙소 좌표
    pub coordinates: Coordinates,
}

/// 오퍼 부분 수정을 위한 요청 DTO
///
/// 모든 필드가 선택적이며, 제공된 필드에만 생성 시와 동일한 제약이 적용됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    #[validate(length(min = 10, max = 100, message = "이름은 10-100자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(length(min = 20, max = 1024, message = "설명은 20-1024자 사이여야 합니다"))]
    pub description: Option<String>,

    pub publication_date: Option<DateTime<Utc>>,

    pub city: Option<City>,

    #[validate(length(max = 256, message = "미리보기 경로는 최대 256자입니다"))]
    pub preview_image: Option<String>,

    #[validate(length(min = 6, max = 6, message = "이미지는 정확히 6장이어야 합니다"))]
    pub images: Option<Vec<String>>,

    pub premium: Option<bool>,

    #[validate(range(min = 1.0, max = 5.0, message = "평점은 1-5 사이여야 합니다"))]
    pub rating: Option<f64>,

    pub housing_type: Option<Housing>,

    #[validate(range(min = 1, max = 8, message = "방 개수는 1-8 사이여야 합니다"))]
    pub room_count: Option<i32>,

    #[validate(range(min = 1, max = 10, message = "수용 인원은 1-10 사이여야 합니다"))]
    pub guest_count: Option<i32>,

    #[validate(range(min = 100, max = 100000, message = "비용은 100-100000 사이여야 합니다"))]
    pub cost: Option<i64>,

    #[validate(length(min = 1, message = "편의시설은 최소 1개 이상이어야 합니다"))]
    pub facilities: Option<Vec<Facility>>,

    pub coordinates: Option<Coordinates>,
}

/// 갤러리 이미지 제거 요청 DTO
///
/// `DELETE /offers/{offer_id}/image`의 본문으로, 제거할 파일명을 지정합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoveImageRequest {
    /// 갤러리에서 제거할 이미지 파일명
    #[validate(length(min = 1, max = 256, message = "이미지 파일명은 1-256자 사이여야 합니다"))]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateOfferRequest {
        CreateOfferRequest {
            name: "Cozy riverside loft".to_string(),
            description: "Bright loft with a canal view, fast wifi and quiet neighbours"
                .to_string(),
            publication_date: Utc::now(),
            city: City::Amsterdam,
            preview_image: "preview.jpg".to_string(),
            images: (1..=6).map(|i| format!("room-{}.jpg", i)).collect(),
            premium: false,
            rating: 4.5,
            housing_type: Housing::Apartment,
            room_count: 3,
            guest_count: 4,
            cost: 1200,
            facilities: vec![Facility::Breakfast, Facility::Washer],
            coordinates: Coordinates {
                latitude: 52.37,
                longitude: 4.89,
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_gallery_size_must_be_exactly_six() {
        let mut five = valid_request();
        five.images.pop();
        assert!(five.validate().is_err());

        let mut seven = valid_request();
        seven.images.push("extra.jpg".to_string());
        assert!(seven.validate().is_err());
    }

    #[test]
    fn test_rating_bounds() {
        let mut low = valid_request();
        low.rating = 0.5;
        assert!(low.validate().is_err());

        let mut high = valid_request();
        high.rating = 5.5;
        assert!(high.validate().is_err());

        let mut edge = valid_request();
        edge.rating = 5.0;
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_cost_bounds() {
        let mut low = valid_request();
        low.cost = 99;
        assert!(low.validate().is_err());

        let mut high = valid_request();
        high.cost = 100_001;
        assert!(high.validate().is_err());
    }

    #[test]
    fn test_room_count_bounds() {
        let mut low = valid_request();
        low.room_count = 0;
        assert!(low.validate().is_err());

        let mut high = valid_request();
        high.room_count = 9;
        assert!(high.validate().is_err());
    }

    #[test]
    fn test_guest_count_bounds() {
        let mut low = valid_request();
        low.guest_count = 0;
        assert!(low.validate().is_err());

        let mut high = valid_request();
        high.guest_count = 11;
        assert!(high.validate().is_err());
    }

    #[test]
    fn test_name_and_description_length() {
        let mut short_name = valid_request();
        short_name.name = "Loft".to_string();
        assert!(short_name.validate().is_err());

        let mut short_description = valid_request();
        short_description.description = "Too short".to_string();
        assert!(short_description.validate().is_err());
    }

    #[test]
    fn test_facilities_must_not_be_empty() {
        let mut request = valid_request();
        request.facilities.clear();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_multiple_violations_are_all_reported() {
        let mut request = valid_request();
        request.rating = 0.0;
        request.cost = 1;
        request.images.pop();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("rating"));
        assert!(fields.contains_key("cost"));
        assert!(fields.contains_key("images"));
    }

    #[test]
    fn test_update_request_validates_only_present_fields() {
        let empty = UpdateOfferRequest::default();
        assert!(empty.validate().is_ok());

        let invalid = UpdateOfferRequest {
            rating: Some(9.0),
            ..UpdateOfferRequest::default()
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_request_accepts_camel_case_json() {
        let json = serde_json::json!({
            "name": "Cozy riverside loft",
            "description": "Bright loft with a canal view, fast wifi and quiet neighbours",
            "publicationDate": "2024-05-01T10:00:00Z",
            "city": "Paris",
            "previewImage": "preview.jpg",
            "images": ["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg", "6.jpg"],
            "premium": true,
            "rating": 3.0,
            "housingType": "apartment",
            "roomCount": 2,
            "guestCount": 2,
            "cost": 500,
            "facilities": ["Breakfast", "Air conditioning"],
            "coordinates": { "latitude": 48.85, "longitude": 2.35 }
        });

        let request: CreateOfferRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.city, City::Paris);
        assert_eq!(request.facilities[1], Facility::AirConditioning);
        assert!(request.validate().is_ok());
    }
}
