// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{FakeArchiveAdapter, FakeCatalogAdapter, FakeNotifyAdapter};
use sg_core::default_catalog;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::default();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

#[test]
fn traced_catalog_logs_span_and_timing() {
    let fake = FakeCatalogAdapter::new();
    fake.add_flow("urgent", default_catalog());

    let (logs, result) = with_tracing(|| async {
        TracedCatalogAdapter::new(fake.clone()).fetch("urgent").await
    });

    assert!(result.is_ok());
    assert!(logs.contains("catalog.fetch"), "Logs:\n{}", logs);
    assert!(logs.contains("config_id=\"urgent\""), "Logs:\n{}", logs);
    assert!(logs.contains("catalog loaded"), "Logs:\n{}", logs);
    assert!(logs.contains("stages=9"), "Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Logs:\n{}", logs);
}

#[test]
fn traced_catalog_logs_lookup_failure() {
    let (logs, result) = with_tracing(|| async {
        TracedCatalogAdapter::new(FakeCatalogAdapter::new())
            .fetch("missing")
            .await
    });

    assert!(matches!(result, Err(CatalogLookupError::NotFound(_))));
    assert!(logs.contains("lookup failed"), "Logs:\n{}", logs);
    assert!(logs.contains("WARN"), "Logs:\n{}", logs);
}

#[test]
fn traced_notify_passes_through_failures() {
    let fake = FakeNotifyAdapter::new();
    fake.fail_next(1);

    let (logs, results) = with_tracing(|| async {
        let traced = TracedNotifyAdapter::new(fake.clone());
        let first = traced.notify("version V1 entered stage BTE Test").await;
        let second = traced.notify("version V1 entered stage BTE Test").await;
        (first, second)
    });

    assert!(results.0.is_err());
    assert!(results.1.is_ok());
    assert_eq!(fake.attempts(), 2);
    assert_eq!(fake.sent(), vec!["version V1 entered stage BTE Test"]);
    assert!(logs.contains("notify.send"), "Logs:\n{}", logs);
    assert!(logs.contains("send failed"), "Logs:\n{}", logs);
    assert!(logs.contains("sent"), "Logs:\n{}", logs);
}

#[test]
fn traced_archive_logs_version() {
    let fake = FakeArchiveAdapter::new();

    let (logs, result) = with_tracing(|| async {
        TracedArchiveAdapter::new(fake.clone())
            .archive(&VersionId::new("V7"))
            .await
    });

    assert!(result.is_ok());
    assert_eq!(fake.archived(), vec![VersionId::new("V7")]);
    assert!(logs.contains("archive.run"), "Logs:\n{}", logs);
    assert!(logs.contains("version=V7"), "Logs:\n{}", logs);
    assert!(logs.contains("archived"), "Logs:\n{}", logs);
}
