//! Linking: single-successor enforcement and the pre-built-step escape
//! hatch.

use weft::{join, run, FlowBuilder};

use crate::common::{add, double};

/// **Scenario**: `join` called twice on the same tail fails on the second
/// call, and the first link remains intact.
#[tokio::test]
async fn join_twice_fails_and_keeps_first_link() {
    let s1 = double();
    let s2 = add("add_two", 2);
    let s3 = add("add_three", 3);

    join(&s1, &s2).unwrap();
    let err = join(&s1, &s3).unwrap_err();
    assert_eq!(err.step, "double");
    assert_eq!(err.next, "add_two");
    assert_eq!(
        err.to_string(),
        "step \"double\" already has next step \"add_two\""
    );

    assert_eq!(s1.next().unwrap().name(), "add_two");
    assert_eq!(run(&s1, 5).await.unwrap(), 12);
}

/// A builder chain whose tail was linked externally refuses further fluent
/// extension instead of silently rewiring.
#[tokio::test]
async fn builder_extension_fails_after_external_link() {
    let chain = FlowBuilder::new().step("start", |x: i32| async move { Ok(x) });
    let external = add("external", 1);
    join(&chain, &external).unwrap();

    let err = chain
        .step("more", |x| async move { Ok(x) })
        .unwrap_err();
    assert_eq!(err.step, "start");
    assert_eq!(err.next, "external");
}

/// `next` attaches an externally pre-built step and continues the chain
/// from it.
#[tokio::test]
async fn next_attaches_prebuilt_step() {
    let pre_built = add("pre_built", 7);

    let flow = FlowBuilder::new()
        .step("double", |x: i32| async move { Ok(x * 2) })
        .next(pre_built)
        .unwrap()
        .step("add_one", |x| async move { Ok(x + 1) })
        .unwrap()
        .finish();

    assert_eq!(run(&flow, 4).await.unwrap(), 16);
}
