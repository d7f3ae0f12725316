//! 파일 업로드 처리 유틸리티
//!
//! multipart 요청에서 지정된 필드의 파일 하나를 꺼내 업로드 디렉터리에
//! 저장합니다. 파일명은 UUID로 새로 생성하므로 클라이언트가 보낸 이름과
//! 무관하게 충돌하지 않습니다.
//!
//! 파일이 첨부되지 않은 요청은 에러가 아니며 `None`을 반환합니다.

use actix_multipart::Multipart;
use actix_web::web;
use futures_util::TryStreamExt;
use uuid::Uuid;

use crate::core::errors::{AppError, AppResult, ErrorContext};

/// multipart 요청에서 지정된 필드의 파일을 저장합니다.
///
/// 지정된 필드 이름과 일치하는 첫 번째 파일만 저장하며,
/// 그 외의 필드는 소비만 하고 무시합니다.
///
/// # Arguments
///
/// * `payload` - multipart 요청 본문
/// * `field_name` - 파일이 첨부될 필드 이름 (예: `avatar`, `previewImage`)
/// * `directory` - 저장 대상 디렉터리
///
/// # Returns
///
/// * `Ok(Some(filename))` - 저장된 파일의 새 파일명
/// * `Ok(None)` - 해당 필드에 파일이 첨부되지 않음
/// * `Err(AppError)` - multipart 파싱 오류 또는 파일 저장 실패
pub async fn save_upload(
    payload: &mut Multipart,
    field_name: &str,
    directory: &str,
) -> AppResult<Option<String>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ValidationError(format!("잘못된 multipart 요청입니다: {}", e)))?
    {
        if field.name() != field_name {
            // 대상이 아닌 필드는 스트림만 소비
            while field
                .try_next()
                .await
                .map_err(|e| AppError::ValidationError(format!("multipart 읽기 실패: {}", e)))?
                .is_some()
            {}
            continue;
        }

        let extension = field
            .content_disposition()
            .get_filename()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()))
            .unwrap_or_else(|| "bin".to_string());
        let filename = format!("{}.{}", Uuid::new_v4(), extension);

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ValidationError(format!("multipart 읽기 실패: {}", e)))?
        {
            data.extend_from_slice(&chunk);
        }

        let path = std::path::Path::new(directory).join(&filename);
        web::block(move || std::fs::write(path, data))
            .await
            .context("업로드 작업 스케줄링 실패")?
            .context("업로드 파일 저장 실패")?;

        log::info!("파일 업로드 완료: {}", filename);
        return Ok(Some(filename));
    }

    Ok(None)
}
