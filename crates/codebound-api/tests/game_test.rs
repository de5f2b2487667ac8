//! Integration tests for playing through the HTTP API.

mod common;

use axum::http::StatusCode;
use codebound_test_support::{ScriptedRngSource, SequenceRng};

#[tokio::test]
async fn test_missing_user_header_is_401() {
    let app = common::build_test_app();

    let (status, json) = app.get_anonymous("/api/game-state").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn test_new_user_gets_fresh_game_state() {
    let app = common::build_test_app();

    let (status, json) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["player"]["level"], 1);
    assert_eq!(json["player"]["hp"], 100);
    assert_eq!(json["player"]["gold"], 50);
    assert_eq!(json["current_stage"], 1);
    assert!(json["game_log"].as_array().unwrap().is_empty());
    assert!(json["story_progress"].as_array().unwrap().is_empty());
    assert_eq!(json["available_actions"][0], "story_choice");
}

#[tokio::test]
async fn test_story_choice_advances_stage_and_logs() {
    // Arrange
    let app = common::build_test_app();

    // Act
    let response = app.act("alice", "story_choice", "a").await;
    let (_, state) = app.get_json("alice", "/api/game-state").await;

    // Assert
    assert_eq!(response["success"], true);
    assert_eq!(response["next_stage"], 2);
    assert_eq!(state["current_stage"], 2);
    assert_eq!(state["story_progress"][0]["choice"], "a");
    assert_eq!(state["game_log"][0]["type"], "action");
    assert_eq!(state["game_log"][0]["timestamp"], "10:00:00");
}

#[tokio::test]
async fn test_unknown_action_is_rejected_without_log() {
    let app = common::build_test_app();

    let response = app.act("alice", "teleport", "").await;
    let (_, state) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(response["success"], false);
    assert_eq!(response["message"], "Unknown action");
    assert!(response.get("next_stage").is_none());
    assert!(state["game_log"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_explore_encounter_then_fight_goblin() {
    // Arrange: goblin encounter in the forest, then player 20, goblin 10, player 20
    let rng = SequenceRng::new(vec![0, 0, 20, 10, 20]).with_floats(vec![0.2]);
    let app = common::build_test_app_scripted("alice", rng);

    // Act
    let explored = app.act("alice", "explore", "forest").await;
    let (_, hints) = app.get_json("alice", "/api/update-actions").await;
    let fought = app.act("alice", "fight", "fight_goblin").await;
    let (_, state) = app.get_json("alice", "/api/game-state").await;

    // Assert
    assert_eq!(explored["message"], "You encounter a Goblin!");
    assert_eq!(hints["available_actions"][0], "fight_goblin");
    assert_eq!(fought["success"], true);
    assert_eq!(state["player"]["hp"], 90);
    assert_eq!(state["player"]["exp"], 15);
    assert_eq!(state["player"]["gold"], 60);
    assert_eq!(state["game_log"].as_array().unwrap().len(), 2);
    assert_eq!(fought["combat"]["rounds"], 2);
    assert_eq!(fought["combat"]["damage_taken"], 10);
    assert_eq!(fought["combat"]["victory"], true);
}

#[tokio::test]
async fn test_other_users_do_not_consume_each_others_randomness() {
    // Arrange: each user has exactly the draws for one forest exploration
    let source = ScriptedRngSource::new()
        .with_user("alice", SequenceRng::new(vec![0, 0]).with_floats(vec![0.2]))
        .with_user("bob", SequenceRng::new(vec![2, 2]).with_floats(vec![0.2]));
    let app = common::build_test_app_with_rng(source);

    // Act
    let bob = app.act("bob", "explore", "forest").await;
    let alice = app.act("alice", "explore", "forest").await;

    // Assert
    assert_eq!(bob["message"], "You encounter a Bandit!");
    assert_eq!(alice["message"], "You encounter a Goblin!");
}

#[tokio::test]
async fn test_hub_hints_can_be_sent_back_as_targets() {
    let app = common::build_test_app_scripted(
        "alice",
        SequenceRng::new(vec![1, 0]).with_floats(vec![0.5]),
    );

    let explored = app.act("alice", "explore", "explore_forest").await;
    let accepted = app.act("alice", "quest_accept", "quest_goblin_hunt").await;

    assert_eq!(explored["message"], "You encounter a Wolf!");
    assert_eq!(accepted["message"], "Quest accepted: Goblin Hunt");
}

#[tokio::test]
async fn test_game_state_includes_stage_text_and_choices() {
    let app = common::build_test_app();

    let (_, state) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(state["stage"]["title"], "The Awakening");
    assert_eq!(
        state["stage"]["choices"][0]["label"],
        "Trust Lira and embrace your role"
    );
}

#[tokio::test]
async fn test_shop_lists_catalog() {
    let app = common::build_test_app();

    let response = app.act("alice", "shop", "").await;

    assert_eq!(response["success"], true);
    assert_eq!(response["shop_items"]["health_potion"]["cost"], 20);
    assert_eq!(response["shop_items"]["sword"]["cost"], 100);
    assert_eq!(response["shop_items"]["armor"]["cost"], 80);
}

#[tokio::test]
async fn test_users_do_not_share_state() {
    let app = common::build_test_app();

    app.act("alice", "story_choice", "b").await;
    let (_, alice) = app.get_json("alice", "/api/game-state").await;
    let (_, bob) = app.get_json("bob", "/api/game-state").await;

    assert_eq!(alice["current_stage"], 2);
    assert_eq!(bob["current_stage"], 1);
    assert_eq!(bob["player"]["hp"], 100);
}

#[tokio::test]
async fn test_restart_discards_progress() {
    let app = common::build_test_app();
    app.act("alice", "story_choice", "c").await;

    let (status, json) = app
        .post_json("alice", "/api/restart-game", &serde_json::json!({}))
        .await;
    let (_, state) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(state["current_stage"], 1);
    assert!(state["story_progress"].as_array().unwrap().is_empty());
    assert!(state["game_log"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_game_log_is_capped_at_twenty_entries() {
    let app = common::build_test_app();
    for _ in 0..25 {
        app.act("alice", "shop", "").await;
    }

    let (_, state) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(state["game_log"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn test_ending_is_reported_and_story_closes() {
    let app = common::build_test_app();
    for choice in ["a", "a", "a"] {
        app.act("alice", "story_choice", choice).await;
    }

    let last = app.act("alice", "story_choice", "c").await;
    let again = app.act("alice", "story_choice", "a").await;
    let (_, state) = app.get_json("alice", "/api/game-state").await;

    assert_eq!(last["next_stage"], "complete");
    assert_eq!(last["ending"], "balance");
    assert_eq!(again["success"], false);
    assert_eq!(state["current_stage"], "complete");
    assert_eq!(state["ending"], "balance");
}
