//! Advisory tie-breaking through a text-completion model.
//!
//! The model only ever chooses among candidates the engine already
//! validated, so its worst failure mode is a suboptimal pick. Replies
//! must follow a strict three-line format; anything else is an error
//! and the caller falls back to the first tied candidate.

use anyhow::{bail, Context};
use async_trait::async_trait;
use routine_core::{CandidateSummary, Ranker};
use std::time::Duration;
use tracing::debug;

/// Seam for the model backend. Implementations wrap whatever transport
/// reaches the model; tests stub it with canned strings.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

pub struct AdvisoryRanker<M> {
    model: M,
    timeout: Duration,
}

impl<M: TextCompletion> AdvisoryRanker<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }
}

#[async_trait]
impl<M: TextCompletion> Ranker for AdvisoryRanker<M> {
    async fn rank(
        &self,
        candidates: &[CandidateSummary],
        commute_text: &str,
    ) -> anyhow::Result<usize> {
        if candidates.is_empty() {
            bail!("no candidates to rank");
        }
        let prompt = build_prompt(candidates, commute_text)?;
        let reply = tokio::time::timeout(self.timeout, self.model.complete(&prompt))
            .await
            .context("ranking model timed out")??;
        let advice = parse_advice(&reply, candidates.len())?;
        debug!(
            best_id = advice.best_id,
            score = ?advice.score,
            reason = advice.reason.as_str(),
            "advisory ranking"
        );
        Ok(advice.best_id)
    }
}

fn build_prompt(candidates: &[CandidateSummary], commute_text: &str) -> anyhow::Result<String> {
    let listing =
        serde_json::to_string_pretty(candidates).context("serializing candidates for prompt")?;
    let max_id = candidates.len() - 1;
    Ok(format!(
        "You are a university class schedule advisor. Several candidate weekly \
routines tie on the number of campus days; pick the best one.\n\n\
STUDENT CONTEXT\n{commute_text}\n\n\
WHAT MAKES A GOOD SCHEDULE\n\
- Fewer long idle gaps between classes on the same day\n\
- Classes clustered rather than scattered across the day\n\
- No lone early-morning class on an otherwise free day\n\n\
CANDIDATES (JSON)\n{listing}\n\n\
Respond with EXACTLY three lines and nothing else:\n\
BEST_ID: <integer 0..={max_id}>\n\
SCORE: <integer 0..=100>\n\
REASON: <one short sentence>"
    ))
}

struct Advice {
    best_id: usize,
    score: Option<i64>,
    reason: String,
}

/// Strict three-line reply parse. The id is reduced modulo the
/// candidate count, so an out-of-range answer still lands on a valid
/// candidate instead of failing the request.
fn parse_advice(reply: &str, candidates: usize) -> anyhow::Result<Advice> {
    let lines: Vec<&str> = reply.trim().lines().map(str::trim).collect();
    if lines.len() != 3 {
        bail!("expected 3 reply lines, got {}", lines.len());
    }
    let id_text = lines[0]
        .strip_prefix("BEST_ID:")
        .context("first reply line must start with BEST_ID:")?;
    let raw: i64 = id_text
        .trim()
        .parse()
        .with_context(|| format!("BEST_ID is not an integer: {id_text:?}"))?;
    let best_id = raw.rem_euclid(candidates as i64) as usize;

    let score = lines[1]
        .strip_prefix("SCORE:")
        .and_then(|s| s.trim().parse().ok());
    let reason = lines[2]
        .strip_prefix("REASON:")
        .map(|r| r.trim().to_string())
        .unwrap_or_default();

    Ok(Advice {
        best_id,
        score,
        reason,
    })
}
