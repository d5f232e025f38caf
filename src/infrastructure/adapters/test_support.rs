//! 适配器测试用的进程内 mock HTTP 服务

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// 启动 mock 服务，返回 base URL 和关闭句柄
pub async fn spawn_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}
