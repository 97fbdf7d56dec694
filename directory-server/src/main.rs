use directory_server::{Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment();

    print_banner();
    tracing::info!(
        database = %config.database_path,
        environment = %config.environment,
        "Directory server starting..."
    );

    // 2. 打开数据库，初始化服务器状态
    let state = ServerState::initialize(&config).await?;

    // 3. 启动 HTTP 服务器 (关闭后自动关闭数据库)
    let server = Server::new(state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
