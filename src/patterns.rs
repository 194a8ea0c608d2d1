//! Prompt-engineering helpers that need a model but no tools.

use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

use crate::models::message::Message;
use crate::providers::base::Provider;

/// Prompt chaining: feed each step's instruction together with the previous
/// step's output. Returns the output of every step, in order; the last entry
/// is the chain's final result.
pub async fn chain(provider: &dyn Provider, input: &str, steps: &[&str]) -> Result<Vec<String>> {
    let mut outputs = Vec::with_capacity(steps.len());
    let mut previous = input.to_string();

    for (index, step) in steps.iter().enumerate() {
        let prompt = format!("{}\n\n{}", step, previous);
        debug!(step = index, "running chain step");
        let (response, _usage) = provider
            .complete("", &[Message::user().with_text(prompt)], &[])
            .await?;
        previous = response.text();
        outputs.push(previous.clone());
    }

    Ok(outputs)
}

/// Self-consistency: sample the same prompt several times and return the
/// answer that appears most often. Ties resolve to the earliest sampled
/// answer so the result is deterministic for a given sample order.
pub async fn self_consistency(
    provider: &dyn Provider,
    prompt: &str,
    samples: usize,
) -> Result<String> {
    let mut answers = Vec::with_capacity(samples);
    for _ in 0..samples {
        let (response, _usage) = provider
            .complete("", &[Message::user().with_text(prompt)], &[])
            .await?;
        answers.push(response.text().trim().to_string());
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for answer in &answers {
        *counts.entry(answer).or_insert(0) += 1;
    }

    let mut consensus = String::new();
    let mut best = 0;
    for answer in &answers {
        let count = counts[answer.as_str()];
        if count > best {
            best = count;
            consensus = answer.clone();
        }
    }

    Ok(consensus)
}
