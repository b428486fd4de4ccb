//! Daily wellness check-in companion.
//!
//! The script is built when the persona is created and mentions the mood and
//! goals from the most recent saved check-in, when there is one.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError, render_instructions};
use vdk_store::RecordStore;
use vdk_tool::FunctionTool;

const INSTRUCTIONS: &str = "You are a daily health and wellness voice companion.
You are not a doctor or a therapist. You are a warm, realistic and supportive check-in partner.

In every session:
1) Ask how the user feels today, covering both mood and energy.
2) Ask for one to three simple, realistic goals or intentions for today.
3) Offer small, grounded suggestions: break big goals into small steps, suggest short breaks or walks. Never give medical advice or diagnoses.
4) Close with a short recap of today's mood and goals, then ask whether that sounds right.
5) Call `save_wellness_log` exactly once per check-in, when you know the mood, the goals and a one sentence summary.
6) Keep responses short and natural. No emojis, markdown or special formatting.{last_check_in?}";

const SAVED: &str = "I have saved today's wellness check-in so we can refer back to it next time.";
const SAVE_FAILED: &str = "I had trouble saving today's check-in, so it may not be there next time.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessEntry {
    pub timestamp: DateTime<Utc>,
    pub mood: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveWellnessLogArgs {
    /// Short description of how the user feels today
    pub mood: String,
    /// One to three short goals or intentions for today
    #[serde(default)]
    pub goals: Vec<String>,
    /// One sentence recap of the check-in
    pub summary: String,
}

/// The paragraph appended to the script when a previous check-in exists.
pub fn last_check_in_context(last: &WellnessEntry) -> String {
    let goals = if last.goals.is_empty() {
        "no specific goals".to_string()
    } else {
        last.goals.join(", ")
    };
    format!(
        "\n\nContext from our last check-in:\n\
         - You said you felt: '{}'.\n\
         - Your goals were: {}.\n\
         Gently reference this if it helps, for example by asking how today compares.",
        last.mood, goals
    )
}

struct WellnessInner {
    log: Arc<dyn RecordStore<WellnessEntry>>,
}

impl WellnessInner {
    async fn save_wellness_log(
        &self,
        _ctx: Arc<dyn ToolContext>,
        args: SaveWellnessLogArgs,
    ) -> Result<ToolReply> {
        let entry = WellnessEntry {
            timestamp: Utc::now(),
            mood: args.mood,
            goals: args.goals,
            summary: args.summary,
        };

        self.log.append(entry.clone()).await.map_err(|e| {
            error!(store = %self.log.location(), error = %e, "failed to save wellness entry");
            VdkError::Storage(SAVE_FAILED.to_string())
        })?;

        Ok(ToolReply::new(SAVED, json!(entry)))
    }
}

pub struct WellnessCoach {
    instructions: String,
    inner: Arc<WellnessInner>,
}

impl WellnessCoach {
    pub async fn new(log: Arc<dyn RecordStore<WellnessEntry>>) -> Result<Self> {
        let mut vars = HashMap::new();
        if let Some(last) = log.last().await {
            vars.insert("last_check_in".to_string(), Value::String(last_check_in_context(&last)));
        }
        let instructions = render_instructions(INSTRUCTIONS, &vars)?;

        Ok(Self { instructions, inner: Arc::new(WellnessInner { log }) })
    }
}

impl Persona for WellnessCoach {
    fn name(&self) -> &str {
        "wellness"
    }

    fn description(&self) -> &str {
        "Daily mood and goals check-in that remembers the last session"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let save = FunctionTool::typed(
            "save_wellness_log",
            "Save today's check-in after the mood, goals and recap are known.",
            move |ctx, args: SaveWellnessLogArgs| {
                let inner = inner.clone();
                async move { inner.save_wellness_log(ctx, args).await }
            },
        );
        vec![Arc::new(save)]
    }
}
