//! # Service Registry - 싱글톤 의존성 주입 시스템
//!
//! 리포지토리와 서비스 싱글톤을 관리하는 의존성 주입 컨테이너입니다.
//! Spring Framework의 ApplicationContext 역할을 흉내 낸 구조로,
//! `singleton_macro`의 `#[service]`, `#[repository]` 매크로가 생성하는 등록 정보를
//! `inventory` 크레이트로 컴파일 타임에 수집합니다.
//!
//! ## Spring과의 비교
//!
//! | Spring | 이 프로젝트 | 설명 |
//! |--------|-------------|------|
//! | `@Service` | `#[service(name = "rating")]` | `rating_service`로 등록 |
//! | `@Repository` | `#[repository(name = "recipe", collection = "recipes")]` | `recipe_repository`로 등록 |
//! | `@Bean` | `ServiceLocator::set()` | 인프라 컴포넌트 수동 등록 |
//! | `getBean(Class)` | `ServiceLocator::get::<T>()` | 타입 이름 기반 조회 |
//!
//! ## 동작 원리
//!
//! ```text
//! 1. 컴파일 타임 (Component Scanning)
//!    ├─ #[repository] → RepositoryRegistration 제출
//!    ├─ #[service]    → ServiceRegistration 제출
//!    └─ inventory::collect! → 전역 레지스트리에 등록
//!
//! 2. 런타임 초기화 (Infrastructure Beans)
//!    ├─ Database, RedisClient, RecipeLocks 를 main 에서 직접 생성
//!    └─ ServiceLocator::set() → 전역 컨테이너에 저장
//!
//! 3. initialize_all()
//!    ├─ 모든 리포지토리 생성
//!    └─ 모든 서비스 생성 (Arc<T> 필드는 get::<T>()로 주입)
//! ```
//!
//! ## 이름 규칙
//!
//! `get::<RecipeIngredientRepository>()`는 타입 이름에서 접미사를 떼고 snake_case로
//! 바꾼 `recipe_ingredient`로 등록 정보를 찾습니다. 따라서 매크로의 `name` 인자는
//! 타입 이름의 snake_case 형태와 같아야 합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! // main.rs
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::set(Arc::new(RecipeLocks::new()));
//! ServiceLocator::initialize_all().await?;
//!
//! // 어디서든
//! let ratings = ServiceLocator::get::<RatingRepository>();
//! ```

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::core::errors::{AppError, AppResult};
use crate::utils::display_terminal::{print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete, print_step_start, print_sub_task};

/// 비즈니스 로직 서비스를 위한 공통 인터페이스
///
/// `#[service]` 매크로가 적용된 구조체가 자동으로 구현합니다.
#[async_trait]
pub trait Service: Send + Sync {
    /// 서비스의 고유 이름을 반환합니다 (`{name}_service`).
    fn name(&self) -> &str;

    /// 서비스 초기화 로직을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 데이터 액세스 리포지토리를 위한 공통 인터페이스
///
/// `#[repository]` 매크로가 적용된 구조체가 자동으로 구현합니다.
/// 인덱스 생성은 각 리포지토리의 `create_indexes`가 담당합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리의 고유 이름을 반환합니다 (`{name}_repository`).
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션의 이름을 반환합니다.
    fn collection_name(&self) -> &str;

    /// 리포지토리 초기화 로직을 수행합니다.
    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보
///
/// `#[service]` 매크로가 `inventory::submit!`으로 제출합니다.
pub struct ServiceRegistration {
    /// 서비스의 고유 이름 (`{entity}_service` 형식)
    pub name: &'static str,
    /// 인스턴스 생성 함수. `Box<Arc<T>>`를 반환해야 합니다.
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보
///
/// `#[repository]` 매크로가 `inventory::submit!`으로 제출합니다.
pub struct RepositoryRegistration {
    /// 리포지토리의 고유 이름 (`{entity}_repository` 형식)
    pub name: &'static str,
    /// 인스턴스 생성 함수. `Box<Arc<T>>`를 반환해야 합니다.
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

/// 서비스 이름 → 등록정보 매핑 캐시
static SERVICE_NAME_CACHE: Lazy<HashMap<String, &'static ServiceRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<ServiceRegistration>() {
        cache.insert(extract_clean_name_static(registration.name), registration);
    }

    print_cache_initialized("Service", cache.len());
    cache
});

/// 리포지토리 이름 → 등록정보 매핑 캐시
static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, &'static RepositoryRegistration>> = Lazy::new(|| {
    let mut cache = HashMap::new();

    for registration in inventory::iter::<RepositoryRegistration>() {
        cache.insert(extract_clean_name_static(registration.name), registration);
    }

    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름에서 접미사를 제거합니다.
///
/// `recipe_ingredient_repository` → `recipe_ingredient`
fn extract_clean_name_static(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// CamelCase 타입 이름을 snake_case로 변환합니다.
///
/// `RecipeIngredient` → `recipe_ingredient`
fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// 싱글톤 의존성 주입 컨테이너
///
/// - **싱글톤 보장**: 각 타입당 정확히 하나의 인스턴스
/// - **지연 초기화**: 첫 요청 시점에 등록된 생성자 호출
/// - **순환 참조 감지**: 생성 중인 타입을 추적
pub struct ServiceLocator {
    /// `TypeId`별 인스턴스 캐시
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// 현재 생성 중인 타입들
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 지정된 타입의 싱글톤 인스턴스를 가져옵니다.
    ///
    /// 1. 인스턴스 캐시 확인
    /// 2. 순환 참조 검사
    /// 3. 타입 이름(`RecipeRepository` → repository `recipe`)으로 등록 정보 검색
    /// 4. 생성자 호출 후 캐싱
    ///
    /// 생성자는 잠금 밖에서 호출되므로 생성자 내부에서 다시 `get`을
    /// 호출해도 교착 상태가 발생하지 않습니다.
    ///
    /// # Panics
    ///
    /// 순환 참조, 미등록 타입, 타입 불일치는 설정 오류이므로 즉시 패닉합니다.
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        match Self::try_get::<T>() {
            Ok(instance) => instance,
            Err(e) => panic!("{}", e),
        }
    }

    /// [`get`](Self::get)의 에러 반환 버전입니다.
    pub fn try_get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return Ok(instance);
        }

        {
            let mut initializing = LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner());
            if !initializing.insert(type_id) {
                log::error!("❌ Circular dependency detected for type: {}", type_name);
                return Err(AppError::InternalError(format!(
                    "Circular dependency detected: {} is already being initialized",
                    type_name
                )));
            }
        }

        let result = Self::construct::<T>(type_name);

        LOCATOR.initializing.write().unwrap_or_else(|e| e.into_inner()).remove(&type_id);

        let instance = result?;
        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        let stored = instances
            .entry(type_id)
            .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        stored
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)))
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR.instances.read().unwrap_or_else(|e| e.into_inner());
        instances.get(&type_id).and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> AppResult<Arc<T>> {
        let clean_type_name = Self::extract_clean_type_name(type_name);

        let (boxed, registration_name) = if let Some(entity) = clean_type_name.strip_suffix("Repository") {
            let registration = REPOSITORY_NAME_CACHE.get(&to_snake_case(entity)).ok_or_else(|| {
                AppError::InternalError(format!("No repository found for entity: {}", entity))
            })?;
            ((registration.constructor)(), registration.name)
        } else if let Some(entity) = clean_type_name.strip_suffix("Service") {
            let registration = SERVICE_NAME_CACHE.get(&to_snake_case(entity)).ok_or_else(|| {
                AppError::InternalError(format!("No service found for entity: {}", entity))
            })?;
            ((registration.constructor)(), registration.name)
        } else {
            return Err(AppError::InternalError(format!(
                "Service not found: {}. Declare it with #[service]/#[repository] or ServiceLocator::set()",
                type_name
            )));
        };

        boxed
            .downcast::<Arc<T>>()
            .map(|arc| *arc)
            .map_err(|_| AppError::InternalError(format!("Type mismatch for registration: {}", registration_name)))
    }

    /// 모듈 경로를 제거한 타입 이름을 반환합니다.
    ///
    /// `recipe_catalog_backend::repositories::RecipeRepository` → `RecipeRepository`
    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }

    /// 외부에서 생성된 인스턴스를 직접 등록합니다.
    ///
    /// Database, RedisClient 같은 인프라 컴포넌트를 등록할 때 사용합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());

        log::info!("📦 Registering: {}", clean_name);

        let mut instances = LOCATOR.instances.write().unwrap_or_else(|e| e.into_inner());
        instances.insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 모든 리포지토리와 서비스를 초기화합니다.
    ///
    /// # 초기화 순서
    ///
    /// 1. **Repository**: 데이터 계층 인스턴스 생성
    /// 2. **Service**: 리포지토리가 준비된 뒤 생성
    ///
    /// 인프라 컴포넌트(`Database`, `RedisClient`, `RecipeLocks`)는 호출 전에
    /// [`set`](Self::set)으로 등록되어 있어야 합니다.
    pub async fn initialize_all() -> AppResult<()> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

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
static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
