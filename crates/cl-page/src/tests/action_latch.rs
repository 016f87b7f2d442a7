use crate::ActionLatch;

use googletest::prelude::*;

#[test]
fn given_free_latch_when_acquired_then_second_attempt_fails() {
    let latch = ActionLatch::new("save");

    let guard = latch.try_acquire();

    assert!(guard.is_some());
    assert!(latch.try_acquire().is_none());
    assert!(latch.is_held());
}

#[test]
fn given_guard_dropped_when_acquired_again_then_succeeds() {
    let latch = ActionLatch::new("load");

    drop(latch.try_acquire());

    assert!(!latch.is_held());
    assert!(latch.try_acquire().is_some());
    assert_that!(latch.name(), eq("load"));
}
