// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::panic::{catch_unwind, AssertUnwindSafe};

use tokio::runtime::Handle;
use vuforia_core::{Collaborators, PreconditionViolation, Session, SessionContext};
use vuforia_dry_tests::FakeSdk;

/// Wire every fake of `sdk` into a collaborator set.
pub fn collaborators(sdk: &FakeSdk) -> Collaborators {
    Collaborators {
        engine: sdk.engine.clone(),
        object_tracker: sdk.object_tracker.clone(),
        camera: sdk.camera.clone(),
        device: sdk.device.clone(),
        renderer: sdk.renderer.clone(),
        view: sdk.view.clone(),
        display: sdk.display.clone(),
    }
}

/// Session over `sdk` on the current runtime.
pub fn session(sdk: &FakeSdk) -> Session {
    Session::new(SessionContext::new(collaborators(sdk), Handle::current()))
}

/// Run `f`, returning the precondition payload it panicked with.
pub fn precondition_violation(f: impl FnOnce()) -> Option<PreconditionViolation> {
    let err = catch_unwind(AssertUnwindSafe(f)).err()?;
    err.downcast_ref::<PreconditionViolation>().copied()
}
