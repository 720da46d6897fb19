use add_exam_questions::orchestrator::missing_input_path;
use add_exam_questions::{logger, App, Config};
use anyhow::Result;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::load().await?;

    // 初始化并运行应用
    let app = App::initialize(config)?;
    if let Err(e) = app.run().await {
        if let Some(path) = missing_input_path(&e) {
            error!("❌ 输入文件不存在: {}，题库未修改", path.display());
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
