// Shared race server for one integration test binary.
use std::{
    net::SocketAddr,
    sync::{OnceLock, mpsc},
    time::Duration,
};

#[allow(dead_code)]
pub struct TestServer {
    pub http_url: String,
    pub ws_url: String,
}

static SERVER: OnceLock<TestServer> = OnceLock::new();

// Every test in the binary talks to the same race.
pub fn server() -> &'static TestServer {
    SERVER.get_or_init(|| {
        let addr = spawn_server();
        TestServer {
            http_url: format!("http://{addr}"),
            ws_url: format!("ws://{addr}/ws"),
        }
    })
}

fn spawn_server() -> SocketAddr {
    let (addr_tx, addr_rx) = mpsc::channel();
    // Own runtime so the server outlives each `#[tokio::test]` runtime.
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            addr_tx.send(addr).expect("test thread should be waiting");
            race_server::run(listener).await.expect("race server failed");
        });
    });

    // Bound before the address is sent; early connects wait in the backlog.
    addr_rx
        .recv_timeout(Duration::from_secs(5))
        .expect("race server did not bind in time")
}
