use std::fs;

use tiktok_video_upload::infrastructure::PageDriver;
use tiktok_video_upload::services::caption_service::FALLBACK_CAPTIONS;
use tiktok_video_upload::workflow::PUBLISH_STRATEGIES;
use tiktok_video_upload::{
    launch_browser, CaptionService, Config, CookieStore, LoginFlow, LoginOutcome, PublishStrategy,
    SessionCookie, UploadFlow, UploadRequest,
};

/// 构造一个指向临时目录的配置
fn test_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.cookie_file = dir
        .path()
        .join("config/cookies.json")
        .to_string_lossy()
        .to_string();
    config.output_log_file = dir
        .path()
        .join("upload_log.txt")
        .to_string_lossy()
        .to_string();
    config
}

/// 在临时目录里放一个假视频文件
fn fake_video(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, vec![0u8; 4096]).expect("写入测试视频失败");
    path
}

#[tokio::test]
async fn test_cookie_roundtrip_via_public_api() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    let store = CookieStore::new(&config.cookie_file);

    // 首次 load 创建空文件
    let cookies = store.load().await.expect("load 失败");
    assert!(cookies.is_empty());

    // 保存的内容里混入无效条目，load 回来必须只剩有效的
    let mixed = vec![
        SessionCookie::new("sessionid", "abc123"),
        SessionCookie::new("", "dropped"),
        SessionCookie::new("msToken", "xyz"),
    ];
    store.save(&mixed).await.expect("save 失败");

    let loaded = store.load().await.expect("load 失败");
    assert_eq!(loaded.len(), 2);
    assert!(loaded.iter().all(|c| c.is_valid()));

    // reset 后必须读到空列表
    store.reset().await.expect("reset 失败");
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_caption_degrades_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);
    assert!(!config.has_llm_credentials());

    // 没有凭证也必须拿到非空文案，并且来自内置文案池
    let service = CaptionService::new(&config);
    let caption = service.generate("my holiday vlog").await;
    assert!(!caption.is_empty());
    assert!(FALLBACK_CAPTIONS.contains(&caption.as_str()));
}

#[tokio::test]
async fn test_upload_rejects_bad_extension_before_browser() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.txt");
    fs::write(&path, b"not a video").unwrap();

    // 扩展名不合法必须在创建请求时就被拒绝，根本轮不到浏览器
    let err = UploadRequest::new(&path, "caption").unwrap_err();
    assert!(err.to_string().contains("txt"));
}

#[test]
fn test_publish_strategy_order_is_a_b_c() {
    assert_eq!(PUBLISH_STRATEGIES.len(), 3);
    assert_eq!(PUBLISH_STRATEGIES[0], PublishStrategy::E2eAttribute);
    assert_eq!(PUBLISH_STRATEGIES[1], PublishStrategy::ButtonScan);
    assert_eq!(PUBLISH_STRATEGIES[2], PublishStrategy::Manual);
}

#[tokio::test]
#[ignore] // 默认忽略，需要本机有 Chromium 并手动运行：cargo test -- --ignored
async fn test_browser_launch_and_close() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    let (mut browser, page) = launch_browser(&config).await.expect("启动浏览器失败");

    // 反检测脚本生效后，新页面不应暴露 webdriver 标志
    let driver = PageDriver::new(page);
    driver.navigate("about:blank").await.expect("导航失败");
    let webdriver = driver
        .eval("navigator.webdriver === undefined || navigator.webdriver === false")
        .await
        .expect("执行脚本失败");
    assert_eq!(webdriver, serde_json::Value::Bool(true));

    browser.close().await.expect("关闭浏览器失败");
    let _ = browser.wait().await;
}

#[tokio::test]
#[ignore]
async fn test_login_with_valid_cookie_file_skips_manual_wait() {
    // 前置条件：config/cookies.json 里有一份仍然有效的会话 Cookie
    let config = Config::from_env();
    let (mut browser, page) = launch_browser(&config).await.expect("启动浏览器失败");
    let driver = PageDriver::new(page);

    let flow = LoginFlow::new(&config);
    let outcome = flow.run(&driver).await.expect("登录流程失败");
    assert_eq!(outcome, LoginOutcome::CookieReuse);

    browser.close().await.expect("关闭浏览器失败");
    let _ = browser.wait().await;
}

#[tokio::test]
#[ignore]
async fn test_end_to_end_upload_without_caption() {
    // 端到端场景：空 Cookie 文件 + 有效 mp4 + 无文案。
    // 需要人工在浏览器里完成登录，之后流程应自动走完
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    let video = fake_video(&dir, "demo.mp4");
    let request = UploadRequest::new(&video, "").expect("创建上传请求失败");
    assert!(!request.has_caption());

    let (mut browser, page) = launch_browser(&config).await.expect("启动浏览器失败");
    let driver = PageDriver::new(page);

    let login_flow = LoginFlow::new(&config);
    login_flow.run(&driver).await.expect("登录流程失败");

    let upload_flow = UploadFlow::new(&config);
    let outcome = upload_flow.run(&driver, &request).await;
    assert!(outcome.is_ok(), "上传流程应该成功: {:?}", outcome.err());

    browser.close().await.expect("关闭浏览器失败");
    let _ = browser.wait().await;
}

#[tokio::test]
async fn test_oversized_ai_caption_is_rejected() {
    // 模拟服务返回 250 字符：校验必须拒绝，兜底文案来自内置池
    let service = CaptionService::new(&Config::default());
    let oversized = "a".repeat(250);
    assert!(service.validate_caption(&oversized).is_err());
    assert!(FALLBACK_CAPTIONS.contains(&service.fallback_caption().as_str()));
}

#[test]
fn test_manual_login_budget_is_five_minutes() {
    let flow = LoginFlow::new(&Config::default());
    assert_eq!(flow.manual_wait_budget_secs(), 300);
}
