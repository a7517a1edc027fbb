//! Full session walk-throughs over the model and controller, without any
//! network: batches are installed directly, the way a completed load would.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use catswipe::controller::AppController;
use catswipe::model::{AppModel, LoadToken, Phase, Preview, SwipeDirection};

const TICK: Duration = Duration::from_millis(100);

fn deck_urls(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("https://cataas.com/cat?flow-{i}"))
        .collect()
}

fn tiny_preview() -> Preview {
    Preview {
        width: 1,
        height: 1,
        pixels: vec![[128, 128, 128]],
    }
}

async fn install_deck(model: &AppModel, n: usize, previews: Vec<Option<Preview>>) -> LoadToken {
    let token = model.begin_batch(n).await;
    assert!(model.install_batch(token, deck_urls(n), previews).await);
    token
}

/// Drive ticks until the pending dismissal has fully played out.
async fn settle(controller: &AppController) {
    for _ in 0..20 {
        controller.tick(TICK).await;
    }
}

#[tokio::test]
async fn keyed_swipes_play_a_batch_through_to_results() {
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone());

    install_deck(&*model.lock().await, 3, vec![None, None, None]).await;

    // right, left, right
    for direction in [
        SwipeDirection::Right,
        SwipeDirection::Left,
        SwipeDirection::Right,
    ] {
        controller.request_dismiss(direction).await;
        settle(&controller).await;
    }

    let view = model.lock().await.get_session_view().await;
    assert_eq!(view.phase, Phase::Results);
    assert_eq!(view.current_index, -1);
    // Liked set is the ordered subsequence of right swipes: the card that was
    // on top (deck position 2), then the bottom card (deck position 0).
    assert_eq!(
        view.liked_urls,
        vec![view.cards[2].image_url.clone(), view.cards[0].image_url.clone()]
    );
    // Every card has left the surface.
    assert!(view.cards.iter().all(|card| card.gone));
}

#[tokio::test]
async fn empty_batch_lands_straight_on_results() {
    let model = AppModel::new();
    install_deck(&model, 0, vec![]).await;

    let view = model.get_session_view().await;
    assert_eq!(view.phase, Phase::Results);
    assert!(view.liked_urls.is_empty());
}

#[tokio::test]
async fn partially_failed_preloads_still_fill_the_deck() {
    let model = AppModel::new();
    // One of three images never confirmed: its card ships without a preview.
    install_deck(&model, 3, vec![Some(tiny_preview()), None, Some(tiny_preview())]).await;

    let view = model.get_session_view().await;
    assert_eq!(view.phase, Phase::Playing);
    assert_eq!(view.cards.len(), 3);
    assert!(view.cards[0].preview.is_some());
    assert!(view.cards[1].preview.is_none());
    assert!(view.cards[2].preview.is_some());
}

#[tokio::test]
async fn stale_load_completion_is_discarded() {
    let model = AppModel::new();

    let stale = model.begin_batch(5).await;
    let fresh = model.begin_batch(2).await;
    assert!(model.install_batch(fresh, deck_urls(2), vec![None, None]).await);
    assert!(
        !model
            .install_batch(stale, deck_urls(5), vec![None; 5])
            .await
    );

    let view = model.get_session_view().await;
    assert_eq!(view.cards.len(), 2);
    assert_eq!(view.current_index, 1);
}

#[tokio::test]
async fn failed_batch_surfaces_an_error_state() {
    let model = AppModel::new();
    let token = model.begin_batch(3).await;
    assert!(model.fail_batch(token, "no route to host".into()).await);

    assert!(model.has_error().await);
    let view = model.get_session_view().await;
    assert_eq!(view.phase, Phase::Loading);
    assert_eq!(view.load_error.as_deref(), Some("no route to host"));

    // Dismissing the popup must not erase the failure itself: the render
    // snapshot still carries it until a retry succeeds.
    model.clear_error().await;
    assert!(!model.has_error().await);
    let view = model.get_session_view().await;
    assert_eq!(view.load_error.as_deref(), Some("no route to host"));

    let retry = model.begin_batch(3).await;
    assert!(model.install_batch(retry, deck_urls(3), vec![None, None, None]).await);
    assert!(model.get_session_view().await.load_error.is_none());
}

#[tokio::test]
async fn mouse_drag_past_threshold_resolves_a_like() {
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone());

    install_deck(&*model.lock().await, 2, vec![None, None]).await;

    {
        let model = model.lock().await;
        model.begin_drag(40).await;
        model.drag_to_column(65).await; // 25 cells, well past the threshold
        model.release_drag().await;
    }
    settle(&controller).await;

    let view = model.lock().await.get_session_view().await;
    assert_eq!(view.current_index, 0);
    assert_eq!(view.liked_urls.len(), 1);
    assert_eq!(view.phase, Phase::Playing);
}

#[tokio::test]
async fn short_drag_snaps_back_without_resolving() {
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone());

    install_deck(&*model.lock().await, 2, vec![None, None]).await;

    {
        let model = model.lock().await;
        model.begin_drag(40).await;
        model.drag_to_column(43).await; // 3 cells, below the threshold
        model.release_drag().await;
    }
    settle(&controller).await;

    let view = model.lock().await.get_session_view().await;
    assert_eq!(view.current_index, 1);
    assert!(view.liked_urls.is_empty());
    assert_eq!(view.cards[1].offset, 0.0);
}

#[tokio::test]
async fn dismissals_after_exhaustion_are_no_ops() {
    let model = Arc::new(Mutex::new(AppModel::new()));
    let controller = AppController::new(model.clone());

    install_deck(&*model.lock().await, 1, vec![None]).await;
    controller.request_dismiss(SwipeDirection::Left).await;
    settle(&controller).await;

    // Nothing left on the stack; further requests change nothing.
    controller.request_dismiss(SwipeDirection::Right).await;
    settle(&controller).await;

    let view = model.lock().await.get_session_view().await;
    assert_eq!(view.phase, Phase::Results);
    assert!(view.liked_urls.is_empty());
    assert_eq!(view.current_index, -1);
}
