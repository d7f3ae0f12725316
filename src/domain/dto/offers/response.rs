//! 오퍼 응답 DTO
//!
//! 영속 엔티티를 화이트리스트된 와이어 형태로 투영합니다.
//! 목록 응답에서는 저장 필드 `publication_date`가 와이어 키 `createdAt`으로
//! 노출되고, 즐겨찾기 목록 응답에서는 `favorite`가 항상 `true`로 강제됩니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::offers::offer::{City, Coordinates, Facility, Housing, Offer};

/// 전체 오퍼 응답 DTO (생성/단건 조회/수정)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub publication_date: String,
    pub city: City,
    pub preview_image: String,
    pub images: Vec<String>,
    pub premium: bool,

    /// 조회자 기준 즐겨찾기 여부 (저장되지 않는 파생 값)
    pub favorite: bool,

    pub rating: f64,
    pub housing_type: Housing,
    pub room_count: i32,
    pub guest_count: i32,
    pub cost: i64,
    pub facilities: Vec<Facility>,
    pub user_id: String,
    pub comments_count: i64,
    pub coordinates: Coordinates,
}

impl From<Offer> for OfferResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: offer.name,
            description: offer.description,
            publication_date: offer
                .publication_date
                .try_to_rfc3339_string()
                .unwrap_or_default(),
            city: offer.city,
            preview_image: offer.preview_image,
            images: offer.images,
            premium: offer.premium,
            favorite: false,
            rating: offer.rating,
            housing_type: offer.housing_type,
            room_count: offer.room_count,
            guest_count: offer.guest_count,
            cost: offer.cost,
            facilities: offer.facilities,
            user_id: offer.user_id.to_hex(),
            comments_count: offer.comments_count,
            coordinates: offer.coordinates,
        }
    }
}

/// 오퍼 목록 항목 응답 DTO
///
/// 목록 조회용 축약 형태입니다. 게시 일시는 와이어 키 `createdAt`으로 노출됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferListItemResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub publication_date: String,
    pub city: City,
    pub preview_image: String,
    pub premium: bool,
    pub favorite: bool,
    pub rating: f64,
    pub housing_type: Housing,
    pub cost: i64,
    pub comments_count: i64,
}

impl From<Offer> for OfferListItemResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: offer.name,
            publication_date: offer
                .publication_date
                .try_to_rfc3339_string()
                .unwrap_or_default(),
            city: offer.city,
            preview_image: offer.preview_image,
            premium: offer.premium,
            favorite: false,
            rating: offer.rating,
            housing_type: offer.housing_type,
            cost: offer.cost,
            comments_count: offer.comments_count,
        }
    }
}

/// 즐겨찾기 목록 항목 응답 DTO
///
/// 목록 형태에 설명이 추가되며, 저장 상태와 무관하게 `favorite`는 항상 `true`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteOfferResponse {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub publication_date: String,
    pub description: String,
    pub city: City,
    pub preview_image: String,
    pub premium: bool,
    pub favorite: bool,
    pub rating: f64,
    pub housing_type: Housing,
    pub cost: i64,
    pub comments_count: i64,
}

impl From<Offer> for FavoriteOfferResponse {
    fn from(offer: Offer) -> Self {
        Self {
            id: offer.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: offer.name,
            publication_date: offer
                .publication_date
                .try_to_rfc3339_string()
                .unwrap_or_default(),
            description: offer.description,
            city: offer.city,
            preview_image: offer.preview_image,
            premium: offer.premium,
            favorite: true,
            rating: offer.rating,
            housing_type: offer.housing_type,
            cost: offer.cost,
            comments_count: offer.comments_count,
        }
    }
}

/// 미리보기 이미지 업로드 응답 DTO
///
/// 파일이 첨부되지 않은 요청은 에러가 아니며 `previewImage`가 `null`이 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub preview_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{oid::ObjectId, DateTime};

    fn sample_offer() -> Offer {
        Offer {
            id: Some(ObjectId::new()),
            name: "Cozy riverside loft".to_string(),
            description: "Bright loft with a canal view, fast wifi and quiet neighbours"
                .to_string(),
            publication_date: DateTime::now(),
            city: City::Amsterdam,
            preview_image: "preview.jpg".to_string(),
            images: (1..=6).map(|i| format!("room-{}.jpg", i)).collect(),
            premium: true,
            rating: 4.5,
            housing_type: Housing::Apartment,
            room_count: 3,
            guest_count: 4,
            cost: 1200,
            facilities: vec![Facility::Breakfast],
            user_id: ObjectId::new(),
            comments_count: 7,
            coordinates: Coordinates {
                latitude: 52.37,
                longitude: 4.89,
            },
            created_at: DateTime::now(),
            updated_at: DateTime::now(),
        }
    }

    #[test]
    fn test_full_response_preserves_scalar_fields() {
        let offer = sample_offer();
        let response = OfferResponse::from(offer.clone());

        assert_eq!(response.id, offer.id.unwrap().to_hex());
        assert_eq!(response.name, offer.name);
        assert_eq!(response.description, offer.description);
        assert_eq!(response.city, offer.city);
        assert_eq!(response.rating, offer.rating);
        assert_eq!(response.room_count, offer.room_count);
        assert_eq!(response.guest_count, offer.guest_count);
        assert_eq!(response.cost, offer.cost);
        assert_eq!(response.comments_count, offer.comments_count);
        assert_eq!(response.images.len(), 6);
        assert!(!response.favorite);
    }

    #[test]
    fn test_full_response_never_exposes_raw_object_ids() {
        let offer = sample_offer();
        let response = OfferResponse::from(offer.clone());

        assert_eq!(response.user_id, offer.user_id.to_hex());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("$oid").is_none());
        assert!(json["userId"].is_string());
    }

    #[test]
    fn test_list_item_renames_publication_date() {
        let response = OfferListItemResponse::from(sample_offer());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("publicationDate").is_none());
    }

    #[test]
    fn test_favorite_response_forces_favorite_flag() {
        // 저장 상태와 무관하게 즐겨찾기 목록에서는 항상 true
        let response = FavoriteOfferResponse::from(sample_offer());
        assert!(response.favorite);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["favorite"], serde_json::json!(true));
        assert!(json.get("description").is_some());
    }
}
