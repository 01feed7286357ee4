use anyhow::Result;
use tiktok_video_upload::utils::logging;
use tiktok_video_upload::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::new(config)?.run().await?;

    Ok(())
}
