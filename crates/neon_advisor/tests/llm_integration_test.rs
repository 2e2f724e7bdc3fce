//! Live provider tests. Run with `--features api` and API keys set.

use neon_advisor::{AdvisorConfig, HintAdvisor, LlmClient, LlmProvider};
use neon_tictactoe::{Board, Mark, apply_move};

async fn live_hint(provider: LlmProvider) {
    dotenvy::dotenv().ok();

    let config = AdvisorConfig::new(provider);
    config
        .create_llm_config()
        .expect("API key for provider not set");

    // X threatens the top row; O should block at 2.
    let board = apply_move(&Board::new(), 0, Mark::X).expect("legal");
    let board = apply_move(&board, 4, Mark::O).expect("legal");
    let board = apply_move(&board, 1, Mark::X).expect("legal");

    let outcome = HintAdvisor::from_config(&config)
        .request_hint(&board, Mark::O)
        .await;

    eprintln!("Outcome: {:?}", outcome);
    assert!(!outcome.is_fallback(), "provider reply was rejected");
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_gemini_hint() {
    live_hint(LlmProvider::Gemini).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_hint() {
    live_hint(LlmProvider::OpenAI).await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let llm = AdvisorConfig::new(LlmProvider::Anthropic)
        .create_llm_config()
        .expect("ANTHROPIC_API_KEY not set");
    let response = LlmClient::new(llm)
        .generate(
            "You are a helpful assistant.",
            "Say 'Hello, world!' and nothing else.",
        )
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
}
