#![allow(dead_code)]

use photomailer::application::pipeline::SubmissionPipeline;
use photomailer::config::PipelineConfig;
use photomailer::domain::form::FormData;
use photomailer::infrastructure::in_memory::InMemoryTransport;
use photomailer::interfaces::http;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const PASSPHRASE: &str = "care for your surroundings";

pub fn pipeline(transport: &InMemoryTransport) -> SubmissionPipeline {
    let config = PipelineConfig::new(PASSPHRASE).unwrap();
    SubmissionPipeline::new(config, Box::new(transport.clone()))
}

/// A form with a title, date, the correct passphrase and one caption per entry.
pub fn valid_form(title: &str, date: &str, captions: &[&str]) -> FormData {
    let mut form = FormData::new();
    form.insert("title", title);
    form.insert("date", date);
    form.insert("passphrase", PASSPHRASE);
    form.insert("photoCount", captions.len().to_string());
    for (i, caption) in captions.iter().enumerate() {
        form.insert(format!("caption{i}"), *caption);
    }
    form
}

pub fn form(pairs: &[(&str, &str)]) -> FormData {
    pairs.iter().copied().collect()
}

/// Serves the HTTP adapter on an ephemeral loopback port.
pub async fn spawn_server(transport: &InMemoryTransport) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = http::router(Arc::new(pipeline(transport)), 1024 * 1024);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
