// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Session lifecycle: init sequencing, host events, deferred reconfiguration
//! and teardown, observed through the fake engine's call trace.
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use vuforia_config::{ConfigError, PrefsError, PrefsService, SessionPrefs, SESSION_PREFS_KEY};
use vuforia_core::{InitResult, Phase, PreconditionViolation, Running, SURFACE_SETTLE_DELAY};
use vuforia_dry_tests::{
    Call, FakeFrame, FakeHostEvents, FakeSdk, FakeState, InMemoryConfigStore, InitMode,
    VIEW_HEIGHT, VIEW_SCALE, VIEW_WIDTH,
};
use vuforia_port::{Hint, HostEvent, InterfaceOrientation, Rotation};

fn view_surface() -> Call {
    Call::SurfaceChanged {
        width: VIEW_WIDTH * VIEW_SCALE,
        height: VIEW_HEIGHT * VIEW_SCALE,
    }
}

async fn settle() {
    tokio::time::sleep(SURFACE_SETTLE_DELAY + Duration::from_millis(1)).await;
}

async fn next_turns() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

async fn wait_for_pending_init(sdk: &FakeSdk) {
    while !sdk.engine.has_pending_init() {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Init
// =============================================================================

#[tokio::test(start_paused = true)]
async fn successful_init_runs_setup_in_order() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    assert_eq!(session.init().await, InitResult::Success);
    assert_eq!(session.phase(), Phase::Ready(Running::Resumed));
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::InitRequested,
            Call::SurfaceCreated,
            view_surface(),
            Call::SetRotation(Rotation::Ios90),
            Call::RegisterCallback,
            Call::Resume,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn surface_is_reconfigured_once_after_the_settle_delay() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    sdk.trace.take();

    tokio::time::sleep(SURFACE_SETTLE_DELAY - Duration::from_millis(1)).await;
    assert!(sdk.trace.is_empty());

    sdk.display.set_orientation(InterfaceOrientation::LandscapeRight);
    settle().await;
    assert_eq!(
        sdk.trace.take(),
        vec![view_surface(), Call::SetRotation(Rotation::Ios0)]
    );

    settle().await;
    assert!(sdk.trace.is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_init_skips_setup_and_allows_retry() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Immediate(101));
    let session = common::session(&sdk);

    let result = session.init().await;
    assert_eq!(result, InitResult::Other(101));
    assert_eq!(result.code(), 101);
    assert_eq!(session.phase(), Phase::Uninitialized);
    assert_eq!(sdk.trace.take(), vec![Call::InitRequested]);
    assert!(!sdk.engine.has_callback());

    sdk.engine.set_init_mode(InitMode::Immediate(100));
    assert_eq!(session.init().await, InitResult::Success);
    assert_eq!(sdk.trace.count(|c| *c == Call::RegisterCallback), 1);
}

#[tokio::test(start_paused = true)]
async fn license_failures_are_values() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Immediate(-5));
    let session = common::session(&sdk);

    let result = session.init().await;
    assert_eq!(result, InitResult::LicenseInvalidKey);
    assert!(result.is_license_error());
    assert_eq!(session.phase(), Phase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn dropped_completion_resolves_as_generic_error() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Manual);
    let session = common::session(&sdk);

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.init().await }
    });
    wait_for_pending_init(&sdk).await;
    assert_eq!(session.phase(), Phase::Initializing);
    assert!(sdk.engine.drop_init());

    assert_eq!(task.await.unwrap(), InitResult::Error);
    assert_eq!(session.phase(), Phase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn abandoned_init_still_finishes_setup() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Manual);
    let session = common::session(&sdk);

    let waited = tokio::time::timeout(Duration::from_millis(10), session.init()).await;
    assert!(waited.is_err(), "init must still be pending");
    assert_eq!(session.phase(), Phase::Initializing);

    assert!(sdk.engine.complete_init(100));
    next_turns().await;
    assert_eq!(session.phase(), Phase::Ready(Running::Resumed));
    assert!(sdk.engine.has_callback());
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::InitRequested,
            Call::SurfaceCreated,
            view_surface(),
            Call::SetRotation(Rotation::Ios90),
            Call::RegisterCallback,
            Call::Resume,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_failed_init_can_be_retried() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Manual);
    let session = common::session(&sdk);

    let waited = tokio::time::timeout(Duration::from_millis(10), session.init()).await;
    assert!(waited.is_err());
    assert!(sdk.engine.complete_init(-3));
    next_turns().await;
    assert_eq!(session.phase(), Phase::Uninitialized);

    sdk.engine.set_init_mode(InitMode::Immediate(100));
    assert_eq!(session.init().await, InitResult::Success);
}

#[tokio::test(start_paused = true)]
async fn suspend_during_init_setup_is_not_undone() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    let suspender = session.clone();
    sdk.trace
        .on_next(Call::SurfaceCreated, move || suspender.on_suspend());

    assert_eq!(session.init().await, InitResult::Success);
    assert_eq!(session.phase(), Phase::Ready(Running::Paused));
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::InitRequested,
            Call::SurfaceCreated,
            Call::Pause,
            Call::FinishGlCommands,
            Call::FreeGlResources,
            view_surface(),
            Call::SetRotation(Rotation::Ios90),
            Call::RegisterCallback,
        ]
    );

    session.on_resume();
    assert_eq!(session.phase(), Phase::Ready(Running::Resumed));
}

#[tokio::test(start_paused = true)]
async fn deinit_during_init_setup_stays_terminal() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    let closer = session.clone();
    sdk.trace
        .on_next(Call::SurfaceCreated, move || closer.deinit());

    assert_eq!(session.init().await, InitResult::Success);
    assert_eq!(session.phase(), Phase::Deinitialized);
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::InitRequested,
            Call::SurfaceCreated,
            Call::Deinit,
            Call::Pause,
        ]
    );
    assert!(!sdk.engine.has_callback());

    settle().await;
    assert!(sdk.trace.is_empty());
}

#[tokio::test(start_paused = true)]
async fn deinit_while_initializing_skips_setup() {
    let sdk = FakeSdk::new();
    sdk.engine.set_init_mode(InitMode::Manual);
    let session = common::session(&sdk);

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.init().await }
    });
    wait_for_pending_init(&sdk).await;
    session.deinit();
    assert!(sdk.engine.complete_init(100));

    assert_eq!(task.await.unwrap(), InitResult::Success);
    assert_eq!(session.phase(), Phase::Deinitialized);
    assert_eq!(
        sdk.trace.take(),
        vec![Call::InitRequested, Call::Deinit, Call::Pause]
    );
}

#[tokio::test(start_paused = true)]
async fn second_init_is_a_precondition_violation() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());

    let err = tokio::spawn({
        let session = session.clone();
        async move { session.init().await }
    })
    .await
    .expect_err("second init must panic");
    let payload = err.into_panic();
    let violation = payload
        .downcast_ref::<PreconditionViolation>()
        .expect("typed payload");
    assert_eq!(violation.operation, "init");
    assert_eq!(violation.phase, Phase::Ready(Running::Resumed));
}

// =============================================================================
// Surface
// =============================================================================

#[tokio::test(start_paused = true)]
async fn configure_before_init_panics_with_typed_payload() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    let violation = common::precondition_violation(|| session.configure_surface())
        .expect("configure_surface must panic");
    assert_eq!(violation.operation, "configure_surface");
    assert_eq!(violation.phase, Phase::Uninitialized);
    assert!(sdk.trace.is_empty());

    let violation = common::precondition_violation(|| session.on_surface_changed(1.0, 1.0))
        .expect("on_surface_changed must panic");
    assert_eq!(violation.operation, "on_surface_changed");
}

#[tokio::test(start_paused = true)]
async fn explicit_surface_size_is_forwarded_with_rotation() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    sdk.trace.take();

    sdk.display
        .set_orientation(InterfaceOrientation::PortraitUpsideDown);
    session.on_surface_changed(100.0, 200.0);
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::SurfaceChanged {
                width: 100.0,
                height: 200.0
            },
            Call::SetRotation(Rotation::Ios270),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn layout_uses_the_current_view_size() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    sdk.view.resize(667.0, 375.0);
    session.handle_host_event(HostEvent::SurfaceLayout);
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::SurfaceChanged {
                width: 1334.0,
                height: 750.0
            },
            Call::SetRotation(Rotation::Ios90),
        ]
    );
}

// =============================================================================
// Host events
// =============================================================================

#[tokio::test(start_paused = true)]
async fn suspend_pauses_before_releasing_gl() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    session.on_suspend();
    assert_eq!(
        sdk.trace.take(),
        vec![Call::Pause, Call::FinishGlCommands, Call::FreeGlResources]
    );
    assert_eq!(session.phase(), Phase::Ready(Running::Paused));
}

#[tokio::test(start_paused = true)]
async fn resume_recreates_and_reconfigures_the_surface() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    session.on_suspend();
    sdk.trace.take();

    session.on_resume();
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::Resume,
            Call::SurfaceCreated,
            view_surface(),
            Call::SetRotation(Rotation::Ios90),
        ]
    );
    assert_eq!(session.phase(), Phase::Ready(Running::Resumed));
}

#[tokio::test(start_paused = true)]
async fn deinit_during_suspend_is_not_overwritten() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    let closer = session.clone();
    sdk.trace
        .on_next(Call::FinishGlCommands, move || closer.deinit());
    session.on_suspend();
    session.on_resume();

    assert_eq!(session.phase(), Phase::Deinitialized);
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::Pause,
            Call::FinishGlCommands,
            Call::Deinit,
            Call::Pause,
            Call::FreeGlResources,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn deinit_during_resume_stops_the_resume() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    session.on_suspend();
    sdk.trace.take();

    let closer = session.clone();
    sdk.trace.on_next(Call::Resume, move || closer.deinit());
    session.on_resume();

    assert_eq!(session.phase(), Phase::Deinitialized);
    assert_eq!(
        sdk.trace.take(),
        vec![Call::Resume, Call::Deinit, Call::Pause]
    );
}

#[tokio::test(start_paused = true)]
async fn orientation_change_reads_orientation_on_the_next_turn() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    session.on_orientation_changed();
    assert!(sdk.trace.is_empty());

    sdk.display.set_orientation(InterfaceOrientation::LandscapeLeft);
    next_turns().await;
    assert_eq!(
        sdk.trace.take(),
        vec![view_surface(), Call::SetRotation(Rotation::Ios180)]
    );
}

#[tokio::test(start_paused = true)]
async fn surface_loaded_notifies_surface_creation() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    session.handle_host_event(HostEvent::SurfaceLoaded);
    assert_eq!(sdk.trace.take(), vec![Call::SurfaceCreated]);
}

#[tokio::test(start_paused = true)]
async fn host_events_before_init_are_ignored() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    for event in HostEvent::ALL {
        session.handle_host_event(event);
    }
    next_turns().await;
    assert!(sdk.trace.is_empty());
    assert_eq!(session.phase(), Phase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn bind_host_events_subscribes_once() {
    let sdk = FakeSdk::new();
    let bus = FakeHostEvents::new();
    let session = common::session(&sdk);

    assert!(session.bind_host_events(&bus));
    assert!(!session.bind_host_events(&bus));
    for event in HostEvent::ALL {
        assert_eq!(bus.subscribers(event), 1, "{event:?}");
    }

    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    bus.fire(HostEvent::Suspend);
    assert_eq!(
        sdk.trace.take(),
        vec![Call::Pause, Call::FinishGlCommands, Call::FreeGlResources]
    );
}

#[tokio::test(start_paused = true)]
async fn bound_handlers_do_not_keep_the_session_alive() {
    let sdk = FakeSdk::new();
    let bus = FakeHostEvents::new();
    let session = common::session(&sdk);
    assert!(session.bind_host_events(&bus));
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    drop(session);
    bus.fire(HostEvent::Suspend);
    bus.fire(HostEvent::OrientationChanged);
    next_turns().await;
    assert!(sdk.trace.is_empty());
}

// =============================================================================
// Deinit
// =============================================================================

#[tokio::test(start_paused = true)]
async fn deinit_tears_down_then_pauses_once() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    settle().await;
    sdk.trace.take();

    session.deinit();
    session.deinit();
    assert_eq!(sdk.trace.take(), vec![Call::Deinit, Call::Pause]);
    assert_eq!(session.phase(), Phase::Deinitialized);
}

#[tokio::test(start_paused = true)]
async fn everything_after_deinit_is_inert() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());
    session.deinit();
    sdk.trace.take();

    for event in HostEvent::ALL {
        session.handle_host_event(event);
    }
    settle().await;
    next_turns().await;
    assert!(sdk.trace.is_empty());

    let violation = common::precondition_violation(|| session.configure_surface())
        .expect("configure_surface after deinit must panic");
    assert_eq!(violation.phase, Phase::Deinitialized);
}

// =============================================================================
// State delivery
// =============================================================================

#[tokio::test(start_paused = true)]
async fn states_reach_the_callback_until_cleared() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    session.set_state_callback(move |state| {
        sink.lock().unwrap().push(state.frame().index());
    });
    assert!(session.init().await.is_success());

    let state = |index| {
        FakeState::new()
            .with_frame(FakeFrame {
                index,
                ..FakeFrame::default()
            })
            .into_handle()
    };
    assert!(sdk.engine.deliver(state(7)));
    assert!(sdk.engine.deliver(state(8)));
    session.clear_state_callback();
    assert!(sdk.engine.deliver(state(9)));

    assert_eq!(*seen.lock().unwrap(), vec![7, 8]);
}

#[tokio::test(start_paused = true)]
async fn replacing_the_callback_after_init_takes_effect() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);
    assert!(session.init().await.is_success());

    let seen = Arc::new(Mutex::new(0_usize));
    let sink = Arc::clone(&seen);
    session.set_state_callback(move |_| *sink.lock().unwrap() += 1);
    assert!(sdk.engine.deliver(FakeState::new().into_handle()));
    session.deinit();
    assert!(sdk.engine.deliver(FakeState::new().into_handle()));

    assert_eq!(*seen.lock().unwrap(), 1);
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test(start_paused = true)]
async fn setters_report_engine_verdicts() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    assert!(session.set_license_key("good"));
    sdk.engine.set_license_status(-1);
    assert!(!session.set_license_key("bad"));

    sdk.engine
        .reject_hint(Hint::DelayedLoadingObjectDatasets.raw());
    assert!(session.set_hint(Hint::MaxSimultaneousImageTargets, 4));
    assert!(!session.set_hint(Hint::DelayedLoadingObjectDatasets, 1));
    assert!(session.set_raw_hint(7, 1));
    assert_eq!(sdk.trace.count(|c| *c == Call::SetHint { hint: 7, value: 1 }), 1);

    session.set_scale_factor(2.5);
    assert!((session.scale_factor() - 2.5).abs() < f32::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn saved_prefs_are_applied_in_order() {
    let sdk = FakeSdk::new();
    sdk.engine
        .reject_hint(Hint::DelayedLoadingObjectDatasets.raw());
    let session = common::session(&sdk);

    let prefs = PrefsService::new(InMemoryConfigStore::new());
    prefs
        .save(&SessionPrefs {
            scale_factor: Some(2.0),
            ..SessionPrefs::with_license_key("key-123")
                .hint(Hint::MaxSimultaneousImageTargets, 4)
                .hint(Hint::DelayedLoadingObjectDatasets, 1)
        })
        .unwrap();

    let report = session.apply_saved_prefs(&prefs).unwrap();
    assert_eq!(report.license_key, Some(true));
    assert_eq!(
        report.hints.iter().map(|h| h.accepted).collect::<Vec<_>>(),
        vec![true, false]
    );
    assert!(!report.all_accepted());
    assert_eq!(
        sdk.trace.take(),
        vec![
            Call::SetLicenseKey("key-123".to_owned()),
            Call::SetHint { hint: 0, value: 4 },
            Call::SetHint { hint: 2, value: 1 },
            Call::SetScaleFactor(2.0),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn unreadable_or_invalid_saved_prefs_apply_nothing() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    let store = InMemoryConfigStore::new();
    store.set_fail_reads(true);
    let err = session
        .apply_saved_prefs(&PrefsService::new(store))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));

    let store = InMemoryConfigStore::with_entry(SESSION_PREFS_KEY, br#"{"license_key": ""}"#);
    let err = session
        .apply_saved_prefs(&PrefsService::new(store))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(PrefsError::EmptyLicenseKey)));

    assert!(sdk.trace.is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_prefs_touch_nothing() {
    let sdk = FakeSdk::new();
    let session = common::session(&sdk);

    let report = session.apply_prefs(&SessionPrefs::default());
    assert_eq!(report.license_key, None);
    assert!(report.all_accepted());
    assert!(sdk.trace.is_empty());
}
