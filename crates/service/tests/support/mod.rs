#![allow(dead_code)]

mod stub;

use tokio::net::TcpListener;

pub use stub::{Recorded, Stub};

/// An address nothing listens on.
pub async fn dead_base_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/api", addr))
}
