//! End-to-end tests over a real socket.

use std::time::Duration;

use climate_api::Shutdown;

mod common;

use common::{hawaii_rows, Fixture};

#[tokio::test]
async fn test_concurrent_requests_and_graceful_shutdown() {
    let fixture = Fixture::new(&hawaii_rows(), &["WAIKIKI 717.2, HI US", "KANEOHE 838.1, HI US"]).await;
    let server = fixture.server().await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    // More in-flight requests than pooled connections.
    let mut tasks = Vec::new();
    for i in 0..32 {
        let client = client.clone();
        let uri = match i % 4 {
            0 => "/api/v1.0/precipitation",
            1 => "/api/v1.0/stations",
            2 => "/api/v1.0/tobs",
            _ => "/api/v1.0/2016-08-23/2017-08-23",
        };
        let url = format!("http://{}{}", addr, uri);
        tasks.push(tokio::spawn(async move {
            let res = client.get(url).send().await.expect("service unreachable");
            (res.status().as_u16(), res.text().await.unwrap())
        }));
    }

    let mut stations_body = None;
    for (i, task) in tasks.into_iter().enumerate() {
        let (status, body) = task.await.unwrap();
        assert_eq!(status, 200, "request {i} failed: {body}");
        if i % 4 == 1 {
            match &stations_body {
                None => stations_body = Some(body),
                Some(first) => assert_eq!(first, &body),
            }
        }
    }
    assert_eq!(
        stations_body.as_deref(),
        Some(r#"["WAIKIKI 717.2, HI US","KANEOHE 838.1, HI US"]"#)
    );

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
