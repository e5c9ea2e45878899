mod common;

use common::{async_runner, loadable_runner, run_pending_tasks, Script, TestView};
use loadable::{
    AsyncRenderer, AsyncState, LoadError, LoadableRenderer, LoadableState, LoaderConfig,
    ViewLabels,
};

fn content(value: &impl AsRef<str>) -> TestView {
    TestView::Content(value.as_ref().to_string())
}

// ============================================================================
// AsyncRenderer
// ============================================================================

#[tokio::test]
async fn empty_state_requests_a_single_load() {
    let script = Script::gated(vec![Ok("X".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content);

    assert_eq!(renderer.render(), TestView::Blank);
    assert_eq!(renderer.render(), TestView::Blank);
    assert_eq!(renderer.render(), TestView::Blank);

    // Three renders of the empty state queue exactly one command.
    assert_eq!(runner.pump(), 1);
    assert_eq!(runner.state(), &AsyncState::InProgress);
    run_pending_tasks().await;
    assert_eq!(script.calls(), 1);

    assert_eq!(renderer.render(), TestView::Spinner("Loading...".to_string()));
    script.release();
    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("X".to_string()));
}

#[tokio::test]
async fn success_renders_content() {
    let script = Script::new(vec![Ok("hello".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content);

    runner.load();
    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("hello".to_string()));
    assert_eq!(runner.pump(), 0);
}

#[tokio::test]
async fn failure_offers_retry_that_reloads() {
    let script = Script::gated(vec![Err("E".to_string()), Ok("ok".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content);

    script.release();
    runner.load();
    runner.settle().await;

    let retry = match renderer.render() {
        TestView::Error {
            message,
            retry_label,
            retry,
        } => {
            assert_eq!(message, "E");
            assert_eq!(retry_label, "Retry");
            retry.expect("failure should be retryable")
        }
        other => panic!("Expected error view, got {:?}", other),
    };

    retry.invoke();
    assert_eq!(runner.pump(), 1);
    assert_eq!(runner.state(), &AsyncState::InProgress);
    assert_eq!(renderer.render(), TestView::Spinner("Loading...".to_string()));

    script.release();
    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("ok".to_string()));
}

#[tokio::test]
async fn hidden_loading_renders_blank() {
    let script = Script::gated(vec![Ok("v".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content)
        .with_loading_view(|| TestView::Custom("never".to_string()))
        .hide_loading(true);

    runner.load();
    assert_eq!(renderer.render(), TestView::Blank);
}

#[tokio::test]
async fn custom_factories_replace_defaults() {
    let script = Script::<String>::gated(vec![Err("bad gateway".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content)
        .with_empty_view(|| TestView::Custom("empty".to_string()))
        .with_loading_view(|| TestView::Custom("busy".to_string()))
        .with_error_view(|failure| {
            TestView::Custom(format!(
                "{} retry={}",
                failure.error.user_message(),
                failure.retryable()
            ))
        });

    assert_eq!(renderer.render(), TestView::Custom("empty".to_string()));
    runner.pump();
    assert_eq!(renderer.render(), TestView::Custom("busy".to_string()));

    script.release();
    runner.settle().await;
    assert_eq!(
        renderer.render(),
        TestView::Custom("bad gateway retry=true".to_string())
    );
}

#[tokio::test]
async fn labels_come_from_config() {
    let config = LoaderConfig {
        labels: ViewLabels {
            loading: "Fetching".to_string(),
            retry: "Again".to_string(),
            cancel: "Stop".to_string(),
        },
        ..LoaderConfig::default()
    };
    let script = Script::<String>::gated(vec![Err("E".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content).with_config(&config);

    runner.load();
    assert_eq!(renderer.render(), TestView::Spinner("Fetching".to_string()));

    script.release();
    runner.settle().await;
    match renderer.render() {
        TestView::Error { retry_label, .. } => assert_eq!(retry_label, "Again"),
        other => panic!("Expected error view, got {:?}", other),
    }
}

#[tokio::test]
async fn renderer_sees_changes_from_runner() {
    let script = Script::new(vec![Ok("later".to_string())]);
    let mut runner = async_runner(&script);
    let mut renderer = AsyncRenderer::new(runner.subscribe(), content);

    runner.load();
    assert!(renderer.changed().await);
    assert_eq!(renderer.render(), TestView::Spinner("Loading...".to_string()));

    runner.settle().await;
    assert!(renderer.changed().await);
    assert_eq!(renderer.render(), TestView::Content("later".to_string()));
}

// ============================================================================
// LoadableRenderer
// ============================================================================

#[tokio::test]
async fn idle_state_requests_a_single_fetch() {
    let script = Script::new(vec![Ok("data".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content);

    assert_eq!(renderer.render(), TestView::Blank);
    assert_eq!(renderer.render(), TestView::Blank);
    assert_eq!(runner.pump(), 1);
    assert!(runner.state().is_loading());

    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("data".to_string()));
    assert_eq!(script.calls(), 1);
}

#[tokio::test]
async fn loading_view_gets_last_value_and_cancel() {
    let script = Script::gated(vec![Ok("old".to_string()), Ok("new".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content).with_loading_view(
        |loading| {
            loading.cancel.invoke();
            TestView::Custom(format!("stale={:?}", loading.last))
        },
    );

    script.release();
    runner.fetch();
    runner.settle().await;

    runner.fetch();
    assert_eq!(
        renderer.render(),
        TestView::Custom("stale=Some(\"old\")".to_string())
    );

    // The factory pressed cancel; the old value comes back.
    assert_eq!(runner.pump(), 1);
    assert_eq!(runner.state(), &LoadableState::Loaded("old".to_string()));
    assert_eq!(renderer.render(), TestView::Content("old".to_string()));
}

#[tokio::test]
async fn default_loading_view_is_spinner() {
    let script = Script::<String>::gated(vec![Ok("x".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content);

    runner.fetch();
    assert_eq!(renderer.render(), TestView::Spinner("Loading...".to_string()));
}

#[tokio::test]
async fn hidden_loading_from_config_renders_blank() {
    let config = LoaderConfig {
        hide_loading: true,
        ..LoaderConfig::default()
    };
    let script = Script::gated(vec![Ok("old".to_string()), Ok("new".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content)
        .with_loading_view(|_| TestView::Custom("never".to_string()))
        .with_config(&config);

    script.release();
    runner.fetch();
    runner.settle().await;

    runner.fetch();
    assert_eq!(renderer.render(), TestView::Blank);

    script.release();
    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("new".to_string()));
}

#[tokio::test]
async fn failed_fetch_retry_fetches_again() {
    let script = Script::new(vec![Err("offline".to_string()), Ok("online".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content);

    runner.fetch();
    runner.settle().await;

    let retry = match renderer.render() {
        TestView::Error { message, retry, .. } => {
            assert_eq!(message, "offline");
            retry.expect("failed fetch should offer retry")
        }
        other => panic!("Expected error view, got {:?}", other),
    };

    retry.invoke();
    runner.pump();
    assert!(runner.state().is_loading());
    runner.settle().await;
    assert_eq!(renderer.render(), TestView::Content("online".to_string()));
}

#[tokio::test]
async fn cancelled_without_value_shows_cancellation() {
    let script = Script::<String>::gated(vec![Ok("x".to_string())]);
    let mut runner = loadable_runner(&script);
    let mut renderer = LoadableRenderer::new(runner.subscribe(), content)
        .with_error_view(|failure| TestView::Custom(failure.error.user_message()));

    runner.fetch();
    runner.cancel();
    assert_eq!(runner.state(), &LoadableState::Failed(LoadError::Cancelled));
    assert_eq!(
        renderer.render(),
        TestView::Custom("Loading was cancelled".to_string())
    );
}
