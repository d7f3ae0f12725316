//! Offer Entity Implementation
//!
//! 렌탈 오퍼 엔티티와 오퍼 도메인의 열거형 타입들을 정의합니다.
//! `offers` 컬렉션의 문서 구조에 해당합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 오퍼가 위치할 수 있는 도시
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum City {
    Paris,
    Cologne,
    Brussels,
    Amsterdam,
    Hamburg,
    Dusseldorf,
}

impl City {
    /// 경로 파라미터 문자열에서 도시를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않으며, 목록에 없는 도시는 `None`을 반환합니다.
    pub fn from_param(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paris" => Some(City::Paris),
            "cologne" => Some(City::Cologne),
            "brussels" => Some(City::Brussels),
            "amsterdam" => Some(City::Amsterdam),
            "hamburg" => Some(City::Hamburg),
            "dusseldorf" => Some(City::Dusseldorf),
            _ => None,
        }
    }
}

/// 숙소 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Housing {
    Apartment,
    House,
    Room,
    Hotel,
}

/// 숙소 편의시설
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facility {
    Breakfast,
    #[serde(rename = "Air conditioning")]
    AirConditioning,
    #[serde(rename = "Laptop friendly workspace")]
    LaptopFriendlyWorkspace,
    #[serde(rename = "Baby seat")]
    BabySeat,
    Washer,
    Towels,
    Fridge,
}

/// 숙소 좌표 (위도/경도)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// 렌탈 오퍼 엔티티
///
/// 플랫폼에 게시되는 단기 렌탈 오퍼를 표현하는 핵심 도메인 엔티티입니다.
/// 수치 필드의 범위 제약은 요청 DTO 계층에서 검증되며,
/// 즐겨찾기 여부는 조회자 기준으로 파생되는 값이라 문서에 저장하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 오퍼 이름 (10-100자)
    pub name: String,
    /// 상세 설명 (20-1024자)
    pub description: String,
    /// 게시 일시
    pub publication_date: DateTime,
    /// 도시
    pub city: City,
    /// 미리보기 이미지 경로
    pub preview_image: String,
    /// 갤러리 이미지 경로 (정확히 6장)
    pub images: Vec<String>,
    /// 프리미엄 오퍼 여부
    pub premium: bool,
    /// 평점 (1.0-5.0)
    pub rating: f64,
    /// 숙소 유형
    pub housing_type: Housing,
    /// 방 개수 (1-8)
    pub room_count: i32,
    /// 수용 가능 인원 (1-10)
    pub guest_count: i32,
    /// 1박 비용 (100-100000)
    pub cost: i64,
    /// 편의시설 목록 (최소 1개)
    pub facilities: Vec<Facility>,
    /// 소유자 참조
    pub user_id: ObjectId,
    /// 비정규화된 댓글 수 카운터
    pub comments_count: i64,
    /// 숙소 좌표
    pub coordinates: Coordinates,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Offer {
    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_from_param_is_case_insensitive() {
        assert_eq!(City::from_param("paris"), Some(City::Paris));
        assert_eq!(City::from_param("Amsterdam"), Some(City::Amsterdam));
        assert_eq!(City::from_param("DUSSELDORF"), Some(City::Dusseldorf));
        assert_eq!(City::from_param("seoul"), None);
        assert_eq!(City::from_param(""), None);
    }

    #[test]
    fn test_facility_wire_names() {
        let json = serde_json::to_string(&Facility::LaptopFriendlyWorkspace).unwrap();
        assert_eq!(json, "\"Laptop friendly workspace\"");

        let parsed: Facility = serde_json::from_str("\"Air conditioning\"").unwrap();
        assert_eq!(parsed, Facility::AirConditioning);

        assert!(serde_json::from_str::<Facility>("\"Sauna\"").is_err());
    }

    #[test]
    fn test_housing_wire_names() {
        assert_eq!(serde_json::to_string(&Housing::Apartment).unwrap(), "\"apartment\"");
        let parsed: Housing = serde_json::from_str("\"hotel\"").unwrap();
        assert_eq!(parsed, Housing::Hotel);
    }
}
