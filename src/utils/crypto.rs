//! 비밀번호 해싱 유틸리티
//!
//! HMAC-SHA256 기반의 단방향 비밀번호 다이제스트를 제공합니다.
//! 솔트는 서버 전역 비밀값([`crate::config::PasswordConfig`])이며,
//! 사용자별 솔트가 아니라는 점은 알려진 보안 약점입니다.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 평문과 솔트로부터 HMAC-SHA256 16진수 다이제스트를 생성합니다.
///
/// 입력은 UTF-8 바이트로 처리되며, 결과는 64자리 소문자 16진수 문자열입니다.
///
/// # Examples
///
/// ```rust,ignore
/// let digest = create_sha256("secret1", "server-salt");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn create_sha256(line: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC can take key of any size");
    mac.update(line.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 평문을 다시 해싱하여 저장된 다이제스트와 비교합니다.
pub fn verify_sha256(line: &str, salt: &str, digest: &str) -> bool {
    create_sha256(line, salt) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_deterministic() {
        let first = create_sha256("secret1", "salt");
        let second = create_sha256("secret1", "salt");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_different_salt_changes_digest() {
        assert_ne!(create_sha256("secret1", "salt-a"), create_sha256("secret1", "salt-b"));
    }

    #[test]
    fn test_different_password_changes_digest() {
        assert_ne!(create_sha256("secret1", "salt"), create_sha256("secret2", "salt"));
    }

    #[test]
    fn test_verify_roundtrip() {
        let digest = create_sha256("secret1", "salt");

        assert!(verify_sha256("secret1", "salt", &digest));
        assert!(!verify_sha256("wrong", "salt", &digest));
        assert!(!verify_sha256("secret1", "other-salt", &digest));
    }
}
