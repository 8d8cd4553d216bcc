mod common;

use common::{pipeline, valid_form};
use photomailer::domain::ports::{MessageTransport, MessageTransportBox};
use photomailer::infrastructure::in_memory::InMemoryTransport;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::collections::HashSet;
use std::sync::Arc;

fn random_title(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_do_not_share_state() {
    let transport = InMemoryTransport::new();
    let pipeline = Arc::new(pipeline(&transport));

    let mut rng = rand::thread_rng();
    let requests: Vec<(String, usize)> = (0..64)
        .map(|_| (random_title(&mut rng), rng.gen_range(0..6)))
        .collect();

    let mut handles = Vec::new();
    for (title, photos) in requests.clone() {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            let captions: Vec<String> = (0..photos).map(|i| format!("{title}-{i}")).collect();
            let captions: Vec<&str> = captions.iter().map(String::as_str).collect();
            let outcome = pipeline
                .handle("POST", &valid_form(&title, "today", &captions))
                .await;
            (title, photos, outcome)
        }));
    }

    for handle in handles {
        let (title, photos, outcome) = handle.await.unwrap();
        let body = outcome.body().expect("submission should be sent");

        let mut expected = format!("Date: today\nTitle: {title}\n");
        for i in 0..photos {
            expected.push_str(&format!("photo{i}: {title}-{i}\n"));
        }
        assert_eq!(body, expected);
    }

    let sent: HashSet<String> = transport.sent().await.into_iter().collect();
    assert_eq!(sent.len(), requests.len());
}

#[tokio::test]
async fn test_transport_as_trait_object_across_tasks() {
    let recorder = InMemoryTransport::new();
    let transport: Arc<MessageTransportBox> = Arc::new(Box::new(recorder.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let transport = transport.clone();
            tokio::spawn(async move { transport.send(&format!("body {i}")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(recorder.sent().await.len(), 8);
}
