//! 터미널 출력 포맷팅 유틸리티
//!
//! 레지스트리 초기화와 서버 기동 과정을 사람이 읽기 쉬운 형태로 출력합니다.
//! 로그 레벨 설정과 무관하게 항상 표준 출력으로 나갑니다.

const BOX_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다.
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║        🔄 INITIALIZING SERVICE REGISTRY          ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

/// `→ Step 1: Creating Repository instances`
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// `✓ Step 1: Repository instances created (7 items)`
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 초기화 요약을 출력합니다.
pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 등록 이름 캐시가 만들어졌을 때 항목 수를 출력합니다.
pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

/// 서버 기동 후 노출되는 API 스코프 목록을 출력합니다.
pub fn print_api_scopes(bind_address: &str, scopes: &[&str]) {
    print_boxed_title("🍲 RECIPE CATALOG API");
    for scope in scopes {
        println!("   ├─ http://{}{}", bind_address, scope);
    }
    println!();
}
