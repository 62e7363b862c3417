//! khata-categorize: batch narration classification via a local Ollama
//! model, guided by a learned keyword dictionary.
//!
//! The parsing engine never calls this; the CLI runs it post-hoc over
//! freshly parsed transactions to fill their optional `category` field.

pub mod context;

use std::collections::HashMap;

use anyhow::{bail, Context as _, Result};
use khata_core::{Category, Transaction};
use serde::{Deserialize, Serialize};

pub use context::CategoryContext;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

fn build_system_prompt(ctx: &CategoryContext, count: usize) -> String {
    let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let labels_json = serde_json::to_string(&labels).unwrap_or_default();
    let context_json = serde_json::to_string_pretty(ctx.entries()).unwrap_or_default();

    format!(
        "You are an expert personal finance categorization assistant running locally.\n\
         Your job is to read a JSON object of {count} transaction narrations mapping an ID to a string, \
         and strictly categorize them into ONE of these exact categories:\n{labels_json}\n\n\
         If no specific category fits perfectly, or if the narration is ambiguous, map it to \"misc\".\n\
         You must examine the known mappings (knowledge base) as a guiding signal:\n{context_json}\n\n\
         Respond ONLY with a valid JSON object mapping the exact same IDs to the category string.\n\
         Do not add markdown formatting (```json) or any conversational text. Return the raw JSON object."
    )
}

/// Tolerate models that wrap their JSON in markdown fences anyway.
fn strip_code_fences(raw: &str) -> &str {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("```json")
        .or_else(|| raw.strip_prefix("```"))
        .unwrap_or(raw);
    raw.strip_suffix("```").unwrap_or(raw).trim()
}

/// A merchant string worth remembering: 1-3 alphabetic words, more than
/// 3 chars once digits and punctuation are dropped.
fn clean_merchant_key(merchant: &str) -> Option<String> {
    let cleaned: String = merchant
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let words = cleaned.split_whitespace().count();
    if (1..=3).contains(&words) && cleaned.len() > 3 {
        Some(cleaned)
    } else {
        None
    }
}

/// Classify a batch of transactions in one Ollama round trip.
///
/// Valid labels land in `transaction.category`; labels outside the
/// fixed set are skipped with a warning. Short clean merchant names
/// with a confident non-misc label are learned back into the
/// dictionary, which is persisted when it changed. A severely short
/// response (under half the ids) leaves the batch untouched.
pub async fn categorize_batch(
    transactions: &mut [Transaction],
    ctx: &mut CategoryContext,
    base_url: &str,
    model: &str,
) -> Result<()> {
    if transactions.is_empty() {
        return Ok(());
    }

    let input: HashMap<String, &str> = transactions
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            let narration = if tx.description.is_empty() {
                tx.merchant.as_str()
            } else {
                tx.description.as_str()
            };
            (i.to_string(), narration)
        })
        .collect();

    let system = build_system_prompt(ctx, transactions.len());
    let prompt = format!(
        "Classify these {} transactions:\n{}",
        transactions.len(),
        serde_json::to_string_pretty(&input)?
    );

    tracing::info!(count = transactions.len(), model, "sending batch to Ollama");
    let response = reqwest::Client::new()
        .post(format!("{base_url}/api/generate"))
        .json(&GenerateRequest {
            model,
            system: &system,
            prompt: &prompt,
            stream: false,
        })
        .send()
        .await
        .map_err(|e| {
            if e.is_connect() {
                anyhow::anyhow!(
                    "Ollama connection refused at {base_url}; make sure it is running \
                     (try `ollama serve`) and the model is pulled"
                )
            } else {
                e.into()
            }
        })?;

    if !response.status().is_success() {
        bail!("Ollama API error: {}", response.status());
    }

    let body: GenerateResponse = response.json().await.context("decode Ollama response")?;
    let predicted: HashMap<String, String> =
        serde_json::from_str(strip_code_fences(&body.response))
            .context("parse category map from model output")?;

    if predicted.len() < transactions.len().div_ceil(2) {
        tracing::warn!(
            got = predicted.len(),
            expected = transactions.len(),
            "model returned severely mismatched count; leaving batch uncategorized"
        );
        return Ok(());
    }

    let mut dictionary_updated = false;
    for (i, tx) in transactions.iter_mut().enumerate() {
        let Some(label) = predicted.get(&i.to_string()) else {
            continue;
        };

        let Some(category) = Category::from_label(label) else {
            tracing::warn!(label, "model produced a label outside the category set");
            continue;
        };
        tx.category = Some(category);

        if category != Category::Misc {
            if let Some(key) = clean_merchant_key(&tx.merchant) {
                if ctx.learn(&key, category.as_str()) {
                    dictionary_updated = true;
                }
            }
        }
    }

    if dictionary_updated {
        ctx.save()?;
        tracing::info!("category dictionary updated with new learnings");
    }

    Ok(())
}
