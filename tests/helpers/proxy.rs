use std::sync::{Arc, Mutex};
use tokio::{
    io::copy_bidirectional,
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

/// Tcp proxy in front of the application. Realtime connections can be cut
/// and refused while the rest of the api stays reachable.
pub struct Proxy {
    pub address: String,
    state: Arc<Mutex<ProxyState>>,
}

#[derive(Default)]
struct ProxyState {
    realtime_blocked: bool,
    realtime_connections: Vec<JoinHandle<()>>,
}

impl Proxy {
    pub async fn start(upstream_port: u16) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind proxy");
        let port = listener.local_addr().expect("Proxy address").port();
        let state = Arc::new(Mutex::new(ProxyState::default()));

        let accept_state = state.clone();
        tokio::spawn(async move {
            while let Ok((client, _)) = listener.accept().await {
                tokio::spawn(route(client, upstream_port, accept_state.clone()));
            }
        });

        Self {
            address: format!("http://127.0.0.1:{}/api/v1", port),
            state,
        }
    }

    /// Drops the open realtime connections and refuses new ones
    pub fn cut_realtime(&self) {
        let mut state = self.state.lock().unwrap();
        state.realtime_blocked = true;
        for connection in state.realtime_connections.drain(..) {
            connection.abort();
        }
    }

    pub fn restore_realtime(&self) {
        self.state.lock().unwrap().realtime_blocked = false;
    }
}

async fn route(client: TcpStream, upstream_port: u16, state: Arc<Mutex<ProxyState>>) {
    let mut request_start = [0u8; 256];
    let read = match client.peek(&mut request_start).await {
        Ok(read) => read,
        Err(_) => return,
    };
    let is_realtime = String::from_utf8_lossy(&request_start[..read]).contains("/realtime");
    if !is_realtime {
        pipe(client, upstream_port).await;
        return;
    }

    let mut state = state.lock().unwrap();
    if state.realtime_blocked {
        return;
    }
    let connection = tokio::spawn(pipe(client, upstream_port));
    state.realtime_connections.push(connection);
}

async fn pipe(mut client: TcpStream, upstream_port: u16) {
    if let Ok(mut upstream) = TcpStream::connect(("127.0.0.1", upstream_port)).await {
        let _ = copy_bidirectional(&mut client, &mut upstream).await;
    }
}
