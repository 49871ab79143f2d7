//! Unit tests for the status service.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use portfleet_cli::application::services::status::status;
use portfleet_cli::domain::unit::UnitState;

use crate::mocks::{FakePortProbe, MemoryUnitStore, RecordingServiceManager, events, world};

#[tokio::test]
async fn status_reports_definition_live_state_and_listening() {
    let w = world();
    let store = MemoryUnitStore::new(&w);
    store.seed("ocr-6691.service", b"[Unit]\n");
    store.seed("ocr-6692.service", b"[Unit]\n");
    let manager = RecordingServiceManager::new(&w);
    manager.set_live("ocr-6691.service", UnitState::Running);
    manager.set_live("ocr-6692.service", UnitState::Failed);
    let probe = FakePortProbe {
        listening: HashSet::from([6691]),
        ..FakePortProbe::default()
    };

    let statuses = status(
        "ocr-",
        &[6693, 6692, 6691],
        &store,
        &manager,
        &probe,
        Some("127.0.0.1"),
    )
    .await
    .expect("status succeeds");

    let summary: Vec<(u16, bool, Option<UnitState>, Option<bool>)> = statuses
        .iter()
        .map(|s| (s.port, s.defined, s.live_state, s.listening))
        .collect();
    assert_eq!(
        summary,
        vec![
            (6691, true, Some(UnitState::Running), Some(true)),
            (6692, true, Some(UnitState::Failed), Some(false)),
            (6693, false, Some(UnitState::Absent), Some(false)),
        ]
    );
    assert_eq!(statuses[0].unit, "ocr-6691");
    assert_eq!(
        probe.probed.borrow().first(),
        Some(&("127.0.0.1".to_string(), 6691))
    );
}

#[tokio::test]
async fn status_without_probe_host_never_probes() {
    let w = world();
    let probe = FakePortProbe::default();

    let statuses = status(
        "ocr-",
        &[6691],
        &MemoryUnitStore::new(&w),
        &RecordingServiceManager::new(&w),
        &probe,
        None,
    )
    .await
    .expect("status succeeds");

    assert_eq!(statuses[0].listening, None);
    assert!(probe.probed.borrow().is_empty());
}

#[tokio::test]
async fn unreachable_manager_leaves_live_state_unknown() {
    let w = world();
    let store = MemoryUnitStore::new(&w);
    store.seed("ocr-6691.service", b"[Unit]\n");

    let statuses = status(
        "ocr-",
        &[6691],
        &store,
        &RecordingServiceManager::new(&w).unreachable(),
        &FakePortProbe::default(),
        None,
    )
    .await
    .expect("status still reports");

    assert!(statuses[0].defined);
    assert_eq!(statuses[0].live_state, None);
}

#[tokio::test]
async fn status_is_read_only() {
    let w = world();
    let store = MemoryUnitStore::new(&w);
    store.seed("ocr-6691.service", b"[Unit]\n");

    status(
        "ocr-",
        &[6691, 6692],
        &store,
        &RecordingServiceManager::new(&w),
        &FakePortProbe::default(),
        None,
    )
    .await
    .expect("status succeeds");

    assert!(
        events(&w)
            .iter()
            .all(|e| matches!(e, crate::mocks::Event::Status(_)))
    );
    assert_eq!(store.file_count(), 1);
}

#[tokio::test]
async fn status_rejects_invalid_prefix() {
    let w = world();
    let err = status(
        "9bad",
        &[6691],
        &MemoryUnitStore::new(&w),
        &RecordingServiceManager::new(&w),
        &FakePortProbe::default(),
        None,
    )
    .await
    .expect_err("invalid prefix");
    assert!(err.to_string().contains("Invalid name prefix"), "got: {err}");
}
