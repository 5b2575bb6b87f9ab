//! E2E tests against a live server.
//!
//! Start one first (`cargo run -p staffhub-server`), then:
//!   BASE_URL=http://localhost:3000 cargo test -p staffhub-e2e

use staffhub_e2e::client::TestContext;

fn get_ctx() -> TestContext {
    let base_url = std::env::var("BASE_URL")
        .or_else(|_| std::env::var("STAFFHUB_BASE_URL"))
        .unwrap_or_else(|_| "http://localhost:3000".into());
    TestContext::new(base_url)
}

macro_rules! e2e_test {
    ($module:ident :: $name:ident) => {
        #[tokio::test]
        async fn $name() {
            let ctx = get_ctx();
            staffhub_e2e::specs::$module::$name(&ctx).await.unwrap();
        }
    };
}

staffhub_e2e::for_each_spec!(e2e_test);
