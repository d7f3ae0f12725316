//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 서비스/리포지토리 컴포넌트를 위한 싱글톤 기반 의존성 주입 컨테이너입니다.
//! 컴파일 타임에 `inventory`로 등록 정보를 수집하고, 런타임에는 타입 단위로
//! 지연 초기화된 싱글톤 인스턴스를 제공합니다.
//!
//! ## 주요 구성 요소
//!
//! - **ServiceLocator**: 전역 싱글톤 컨테이너. 모든 서비스/리포지토리 인스턴스를
//!   `TypeId` 키로 캐싱하며, `RwLock`으로 동시 접근을 보호합니다.
//! - **등록 정보**: 각 컴포넌트는 `inventory::submit!`으로
//!   `ServiceRegistration` / `RepositoryRegistration`을 제출합니다.
//! - **수동 등록**: `Database`, `TokenBlacklist` 같은 인프라 컴포넌트는
//!   `ServiceLocator::set()`으로 기동 시점에 직접 등록합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ inventory::submit! → 등록 정보 수집
//!    └─ 이름 캐시 구성 (첫 접근 시 1회)
//!
//! 2. 런타임
//!    ├─ ServiceLocator::set() → 인프라 컴포넌트 등록
//!    ├─ ServiceLocator::initialize_all() → 전체 컴포넌트 선생성
//!    └─ ServiceLocator::get::<T>() → 캐시 조회 또는 지연 생성
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! // 컴포넌트 정의부에서
//! inventory::submit! {
//!     RepositoryRegistration {
//!         name: "offer_repository",
//!         constructor: || Box::new(OfferRepository::new()),
//!     }
//! }
//!
//! // 사용부에서
//! let repo = OfferRepository::instance(); // 항상 동일한 인스턴스
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// 모든 서비스 컴포넌트가 구현하며, 기본 메타데이터와 초기화 훅을 제공합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 서비스 초기화 로직을 수행합니다.
    ///
    /// 인스턴스 생성 직후 호출되며, 필요한 초기 설정 작업을 수행할 수 있습니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// 모든 리포지토리 컴포넌트가 구현하며, 연결된 MongoDB 컬렉션 정보와
/// 인덱스 생성 등 초기화 훅을 제공합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직을 수행합니다.
    ///
    /// 데이터베이스 인덱스 생성, 연결 상태 확인 등의 작업을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// 각 서비스 정의부의 `inventory::submit!`으로 제출되어
/// 컴파일 타임에 전역 레지스트리에 수집됩니다.
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
///
/// ServiceRegistration과 동일한 구조이지만 별도 타입으로 관리됩니다.
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (검색 키로 사용)
    pub name: &'static str,
    /// 인스턴스 생성 함수 (지연 초기화에 사용)
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

// 컴파일 타임에 모든 등록 정보를 수집합니다.
inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<ServiceRegistration>() {
        let clean_name = extract_clean_name_static(registration.name);
        cache.insert(clean_name, registration);
    }

    print_cache_initialized("Service", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
/// 첫 접근 시 한 번만 구성되며, 이후 O(1) 조회 제공
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> =
    Lazy::new(|| {
        let mut cache = HashMap::new();

        for registration in inventory::iter::<RepositoryRegistration>() {
            let clean_name = extract_clean_name_static(registration.name);
            cache.insert(clean_name, registration);
        }

        print_cache_initialized("Repository", cache.len());
        cache
    });

/// 등록된 이름에서 접미사를 제거하여 정규화합니다
///
/// 등록 이름은 `offer_service`, `offer_repository` 형태이므로
/// 이를 `offer`로 정규화하여 타입 이름과 매칭합니다.
fn extract_clean_name_static(name: &str) -> String {
    if name.ends_with("_service") {
        name[..name.len() - 8].to_string()
    } else if name.ends_with("_repository") {
        name[..name.len() - 11].to_string()
    } else {
        name.to_string()
    }
}

/// 싱글톤 의존성 주입 컨테이너
///
/// # 주요 기능
///
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스만 캐싱
/// - **지연 초기화**: 첫 요청 시점에 인스턴스 생성
/// - **순환 참조 방지**: 초기화 중인 타입을 추적하여 조기에 실패
/// - **Thread-safe**: `RwLock` 기반 동시성 안전성
pub struct ServiceLocator {
    /// 생성된 인스턴스들의 캐시 (`TypeId` → 인스턴스)
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 초기화 중인 타입들 (순환 참조 방지용)
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    /// 새로운 ServiceLocator 인스턴스를 생성합니다.
    /// 전역 Lazy static에서만 호출됩니다.
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// ## 처리 과정
    ///
    /// 1. **캐시 확인**: 이미 생성된 인스턴스가 있으면 즉시 반환
    /// 2. **순환 참조 검사**: 현재 생성 중인 타입이면 패닉
    /// 3. **레지스트리 검색**: 타입 이름을 분석하여 등록 정보 조회
    /// 4. **인스턴스 생성**: 락을 쥐지 않은 상태에서 생성자 호출
    ///    (생성자 내부에서 의존성을 `get()`으로 재귀 해석하기 때문)
    /// 5. **캐싱**: 생성된 인스턴스를 캐시에 저장 후 반환
    ///
    /// # Panics
    ///
    /// - 순환 참조가 감지된 경우
    /// - 레지스트리에 등록되지 않은 타입을 요청한 경우
    /// - 등록된 타입과 요청 타입이 일치하지 않는 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        // 이미 생성된 인스턴스 확인
        {
            let instances = LOCATOR.instances.read().unwrap();
            if let Some(instance) = instances.get(&type_id) {
                return instance
                    .clone()
                    .downcast::<T>()
                    .expect("Type mismatch in ServiceLocator");
            }
        }

        // 현재 초기화 중인지 확인 (순환 참조 방지)
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            if !initializing.insert(type_id) {
                panic!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                );
            }
        }

        // 타입 이름에서 실제 타입 이름 추출
        let clean_type_name = Self::extract_clean_type_name(type_name);
        let boxed_instance = if clean_type_name.contains("Repository") {
            // "OfferRepository" -> "offer"
            let entity_name = clean_type_name
                .strip_suffix("Repository")
                .unwrap_or(&clean_type_name)
                .to_lowercase();

            let registration = REPOSITORY_NAME_CACHE
                .get(&entity_name)
                .unwrap_or_else(|| panic!("No repository found for entity: {}", entity_name));
            (registration.constructor)()
        } else if clean_type_name.contains("Service") {
            // "OfferService" -> "offer"
            let entity_name = clean_type_name
                .strip_suffix("Service")
                .unwrap_or(&clean_type_name)
                .to_lowercase();

            let registration = SERVICE_NAME_CACHE
                .get(&entity_name)
                .unwrap_or_else(|| panic!("No service found for entity: {}", entity_name));
            (registration.constructor)()
        } else {
            panic!(
                "Service not found: {}. Make sure it's registered with inventory::submit! \
                 or manually registered with ServiceLocator::set()",
                type_name
            );
        };

        let instance = match boxed_instance.downcast::<Arc<T>>() {
            Ok(arc_instance) => (*arc_instance).clone(),
            Err(_) => panic!("Type mismatch for component: {}", type_name),
        };

        // 캐싱 (동시 생성 시 먼저 저장된 인스턴스를 우선)
        let resolved = {
            let mut instances = LOCATOR.instances.write().unwrap();
            instances
                .entry(type_id)
                .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
                .clone()
                .downcast::<T>()
                .expect("Type mismatch in ServiceLocator")
        };

        // 초기화 완료 표시
        {
            let mut initializing = LOCATOR.initializing.write().unwrap();
            initializing.remove(&type_id);
        }

        resolved
    }

    /// 타입 이름에서 실제 타입 이름을 추출합니다.
    ///
    /// `std::any::type_name::<T>()`는 전체 모듈 경로를 포함하므로
    /// (예: `rental_service_backend::services::offers::OfferService`)
    /// 마지막 세그먼트만 추출하여 매칭에 사용합니다.
    fn extract_clean_type_name(type_name: &str) -> String {
        if let Some(pos) = type_name.rfind("::") {
            type_name[pos + 2..].to_string()
        } else {
            type_name.to_string()
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// 레지스트리로 관리되지 않는 인프라 컴포넌트들(`Database`,
    /// `TokenBlacklist` 등)을 기동 시점에 수동 등록할 때 사용합니다.
    ///
    /// ```rust,ignore
    /// let database = Arc::new(Database::new().await?);
    /// ServiceLocator::set(database);
    /// ```
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let clean_name = Self::extract_clean_type_name(type_name);

        println!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap();
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 서비스와 리포지토리를 초기화합니다.
    ///
    /// 애플리케이션 시작 시 호출되어 등록된 모든 컴포넌트의 인스턴스를
    /// 미리 생성합니다. 리포지토리를 먼저, 서비스를 나중에 생성하여
    /// 데이터 계층 의존성이 항상 먼저 해결되도록 합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        // 1단계: 리포지토리 인스턴스 생성
        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        // 2단계: 서비스 인스턴스 생성
        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _boxed_instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

/// 전역 서비스 로케이터 인스턴스
///
/// 애플리케이션 전체에서 사용되는 유일한 ServiceLocator 인스턴스입니다.
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_clean_name_strips_suffixes() {
        assert_eq!(extract_clean_name_static("offer_repository"), "offer");
        assert_eq!(extract_clean_name_static("user_service"), "user");
        assert_eq!(extract_clean_name_static("token_service"), "token");
        assert_eq!(extract_clean_name_static("plain"), "plain");
    }

    #[test]
    fn test_extract_clean_type_name_strips_module_path() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("crate::services::offers::OfferService"),
            "OfferService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("OfferService"), "OfferService");
    }
}
