//! Integration tests for unique code generation against a seeded store.

use std::collections::HashSet;

use echotap::db::Store;
use echotap::services::{CardError, CodeGenerator};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

async fn spawn_store() -> Store {
    init_tracing();

    Store::with_pool_options("sqlite::memory:", 1, 1)
        .await
        .expect("failed to open in-memory store")
}

#[tokio::test]
async fn generate_on_empty_store_yields_valid_code() {
    let store = spawn_store().await;
    let generator = CodeGenerator::new(store);

    let code = generator.generate().await.expect("generate");

    assert_eq!(code.len(), 8);
    assert!(
        code.chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}

#[tokio::test]
async fn generated_codes_avoid_seeded_collisions() {
    let store = spawn_store().await;

    // All-digit codes are valid members of the A-Z0-9 space.
    let mut seeded = HashSet::new();
    for i in 0..300 {
        let code = format!("{i:08}");
        store
            .insert_card(&code, "seed@x.com")
            .await
            .expect("seed card");
        seeded.insert(code);
    }

    let generator = CodeGenerator::new(store);

    for _ in 0..50 {
        let code = generator.generate().await.expect("generate");
        assert_eq!(code.len(), 8);
        assert!(!seeded.contains(&code), "collision with seeded code {code}");
    }
}

#[tokio::test]
async fn saturated_code_space_reports_exhaustion() {
    let store = spawn_store().await;

    // With single-character codes the whole 36-symbol space can be occupied.
    for b in b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789" {
        let code = (*b as char).to_string();
        store
            .insert_card(&code, "seed@x.com")
            .await
            .expect("seed card");
    }

    let generator = CodeGenerator::with_options(store, 1, 16);

    let err = generator.generate().await.unwrap_err();
    assert!(matches!(
        err,
        CardError::CodeSpaceExhausted { attempts: 16 }
    ));
}
