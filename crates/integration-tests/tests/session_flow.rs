//! End-to-end session journeys through `AppState`.
//!
//! Timer-sensitive tests run with paused time so settle delays are exact.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use u_cook_app::session::SessionError;
use u_cook_app::{AppError, Command};
use u_cook_core::{Cuisine, DishId, Screen, SwipeDirection};
use u_cook_integration_tests::{TEST_SETTLE_DELAY, app_state, onboard, run_commands};

// =============================================================================
// Onboarding
// =============================================================================

#[tokio::test]
async fn test_onboarding_collects_preferences() {
    let state = app_state(TEST_SETTLE_DELAY);
    run_commands(
        &state,
        &[
            "name  Anna ",
            "phone 8 (999) 123-45-67",
            "next",
            "cuisine russian",
            "cuisine japanese",
            "cuisine russian",
            "next",
            "frequency 150",
            "next",
            "min 3000",
            "max 1000",
            "next",
        ],
    )
    .await;

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Main);
    assert_eq!(snapshot.current_dish_index, Some(0));

    let preferences = snapshot.preferences.unwrap();
    assert_eq!(preferences.phone.as_str(), "+79991234567");
    assert_eq!(preferences.cuisines.len(), 1);
    assert!(preferences.cuisines.contains(&Cuisine::Japanese));
    assert_eq!(preferences.frequency.value(), 100);
    assert_eq!((preferences.budget.min(), preferences.budget.max()), (1000, 3000));
}

#[tokio::test]
async fn test_identity_step_blocks_until_valid() {
    let state = app_state(TEST_SETTLE_DELAY);
    run_commands(&state, &["name Anna", "phone 999123456"]).await;

    let err = state.handle(Command::Next).await.unwrap_err();
    let AppError::Session(SessionError::Validation(errors)) = err else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.as_slice().len(), 1);
    assert_eq!(state.screen().await, Screen::Onboarding);

    run_commands(&state, &["phone 9991234567", "next"]).await;
    let rendered = state.render().await.unwrap();
    assert!(rendered.contains("step 2/4"));
}

// =============================================================================
// Swiping
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_right_swipe_is_in_cart_before_settle() {
    let state = app_state(Duration::from_millis(300));
    onboard(&state).await;

    let dispatch = state
        .handle(Command::Swipe(SwipeDirection::Right))
        .await
        .unwrap();
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.cart_count, 1);
    assert_eq!(snapshot.current_dish_index, Some(0));
    assert_eq!(snapshot.swipe_direction, Some(SwipeDirection::Right));

    dispatch.settled().await;
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.current_dish_index, Some(1));
    assert_eq!(snapshot.swipe_direction, None);
}

#[tokio::test]
async fn test_index_wraps_after_n_swipes() {
    let state = app_state(TEST_SETTLE_DELAY);
    onboard(&state).await;

    for n in 1..=7 {
        let line = if n % 3 == 0 { "right" } else { "skip" };
        run_commands(&state, &[line]).await;
        assert_eq!(state.snapshot().await.current_dish_index, Some(n % 3));
    }
    assert_eq!(state.snapshot().await.cart_count, 2);
}

#[tokio::test(start_paused = true)]
async fn test_gesture_during_settle_is_ignored() {
    let state = app_state(Duration::from_millis(300));
    onboard(&state).await;

    let first = state.swipe(SwipeDirection::Right).await.unwrap().unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(state.swipe(SwipeDirection::Right).await.unwrap().is_none());
    assert!(state.swipe(SwipeDirection::Left).await.unwrap().is_none());

    first.await.unwrap();
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.cart_count, 1);
    assert_eq!(snapshot.current_dish_index, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_leaving_main_discards_pending_settle() {
    let state = app_state(Duration::from_millis(300));
    onboard(&state).await;
    run_commands(&state, &["left", "filter quick"]).await;
    assert_eq!(state.snapshot().await.current_dish_index, Some(1));

    let pending = state.swipe(SwipeDirection::Right).await.unwrap().unwrap();
    run_commands(&state, &["cart"]).await;
    pending.await.unwrap();

    run_commands(&state, &["back"]).await;
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.current_dish_index, Some(0));
    assert_eq!(snapshot.swipe_direction, None);
    assert!(snapshot.filters.is_empty());
    assert_eq!(snapshot.cart_count, 1);
}

// =============================================================================
// Menu, chef and cart
// =============================================================================

#[tokio::test]
async fn test_chef_from_card_then_cart() {
    let state = app_state(TEST_SETTLE_DELAY);
    onboard(&state).await;
    run_commands(&state, &["skip", "skip", "chef", "add 1", "add 1", "back", "cart"]).await;

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Cart);
    assert_eq!(snapshot.selected_chef.unwrap().name, "Elena Petrova");
    assert_eq!(snapshot.cart_count, 2);

    let rendered = state.render().await.unwrap();
    assert!(rendered.contains("Home-style borscht x2  ₽840"));
    assert!(rendered.contains("Total: ₽840"));

    run_commands(&state, &["remove 1"]).await;
    assert_eq!(state.snapshot().await.cart_count, 0);
}

#[tokio::test]
async fn test_menu_lists_catalog_and_opens_chef() {
    let state = app_state(TEST_SETTLE_DELAY);
    onboard(&state).await;
    run_commands(&state, &["menu"]).await;

    let rendered = state.render().await.unwrap();
    assert!(rendered.contains("1. Pasta Carbonara"));
    assert!(rendered.contains("3. Home-style borscht"));

    let err = state.handle(Command::Chef(Some(9))).await.unwrap_err();
    assert!(err.is_user_error());

    run_commands(&state, &["chef 1", "add 1"]).await;
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Chef);
    assert_eq!(snapshot.cart.items()[0].id, DishId::new("1"));
}

#[tokio::test]
async fn test_blank_chef_screen() {
    let state = app_state(TEST_SETTLE_DELAY);
    state.with_session(|session| session.navigate(Screen::Chef)).await;

    assert_eq!(state.render().await.unwrap(), "");
    assert!(state.snapshot().await.selected_chef.is_none());
}

#[tokio::test]
async fn test_snapshot_json_shape() {
    let state = app_state(TEST_SETTLE_DELAY);
    onboard(&state).await;
    run_commands(&state, &["like", "filter hot"]).await;

    let value = serde_json::to_value(state.snapshot().await).unwrap();
    assert_eq!(value["screen"], "main");
    assert_eq!(value["cart_count"], 1);
    assert_eq!(value["current_dish"]["id"], "2");
    assert_eq!(value["filters"], serde_json::json!(["hot"]));
    assert_eq!(value["preferences"]["phone"], "+79991234567");
}
