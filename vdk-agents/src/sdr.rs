//! Sales development rep that answers from an FAQ and captures a lead.

use crate::models::FaqEntry;
use crate::render_with;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError};
use vdk_store::RecordStore;
use vdk_tool::{FunctionTool, best_match};

const INSTRUCTIONS: &str = "You are a friendly sales development representative for {company}, an Indian online discount brokerage.
You are speaking with potential customers by voice.

Your goals:
1) Greet the visitor warmly and introduce yourself as part of {company}.
2) Ask what brought them here and what they are working on.
3) Work out whether they are investors or traders, beginners or advanced.
4) Answer questions about {company} only with what `search_faq` returns. Never invent exact numbers or promises.
5) Over the conversation, politely collect: name, company (or 'individual'), email, role, use case, team size, and timeline (now, soon or later).
6) When the user says they are done and you have most of these details, give a short spoken summary of who they are, what they want and their timeline, then call `save_lead` exactly once.
7) If you are unsure about something, say so honestly.
8) Keep answers short and clear. No emojis or markdown.";

const NO_FAQ: &str = "I do not have company FAQ data loaded right now.";
const INCOMPLETE_ANSWER: &str = "I have an answer, but it seems incomplete.";
const LEAD_SAVED: &str = "I have saved this lead to the system.";
const LEAD_FAILED: &str = "I had an issue saving your details. Please share them again later.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub company: String,
    pub email: String,
    pub role: String,
    pub use_case: String,
    pub team_size: String,
    pub timeline: String,
    pub summary: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchFaqArgs {
    /// The visitor's question, in their words
    pub question: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveLeadArgs {
    pub name: String,
    /// Company name, or 'individual'
    pub company: String,
    pub email: String,
    /// What they do, e.g. founder, student, trader
    pub role: String,
    /// What they want the platform for
    pub use_case: String,
    pub team_size: String,
    /// now, soon or later
    pub timeline: String,
    /// One or two sentence summary of the conversation
    pub summary: String,
}

struct SdrInner {
    company: String,
    faq: Arc<Vec<FaqEntry>>,
    leads: Arc<dyn RecordStore<Lead>>,
}

impl SdrInner {
    fn no_match_message(&self) -> String {
        format!(
            "I am not sure about that specific detail. You may need to check the {} website for the latest information.",
            self.company
        )
    }

    async fn search_faq(
        &self,
        _ctx: Arc<dyn ToolContext>,
        args: SearchFaqArgs,
    ) -> Result<ToolReply> {
        if self.faq.is_empty() {
            return Err(VdkError::NotFound(NO_FAQ.to_string()));
        }

        let Some(found) = best_match(&self.faq, &args.question) else {
            debug!(question = %args.question, "no FAQ entry matched");
            return Err(VdkError::NotFound(self.no_match_message()));
        };

        debug!(index = found.index, score = found.score, "FAQ entry matched");
        let message = found.item.answer.clone().unwrap_or_else(|| INCOMPLETE_ANSWER.to_string());
        Ok(ToolReply::new(
            message,
            json!({ "question": found.item.question, "score": found.score }),
        ))
    }

    async fn save_lead(&self, _ctx: Arc<dyn ToolContext>, args: SaveLeadArgs) -> Result<ToolReply> {
        let lead = Lead {
            timestamp: Utc::now(),
            name: args.name,
            company: args.company,
            email: args.email,
            role: args.role,
            use_case: args.use_case,
            team_size: args.team_size,
            timeline: args.timeline,
            summary: args.summary,
        };

        self.leads.append(lead.clone()).await.map_err(|e| {
            error!(store = %self.leads.location(), error = %e, "failed to save lead");
            VdkError::Storage(LEAD_FAILED.to_string())
        })?;

        Ok(ToolReply::new(LEAD_SAVED, json!(lead)))
    }
}

pub struct SalesRep {
    instructions: String,
    inner: Arc<SdrInner>,
}

impl SalesRep {
    pub fn new(
        company: &str,
        faq: Arc<Vec<FaqEntry>>,
        leads: Arc<dyn RecordStore<Lead>>,
    ) -> Result<Self> {
        Ok(Self {
            instructions: render_with(INSTRUCTIONS, "company", company)?,
            inner: Arc::new(SdrInner { company: company.to_string(), faq, leads }),
        })
    }
}

impl Persona for SalesRep {
    fn name(&self) -> &str {
        "sdr"
    }

    fn description(&self) -> &str {
        "Answers product questions from the FAQ and captures a sales lead"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let search_faq = FunctionTool::typed(
            "search_faq",
            "Look up company information: what it does, who it is for, pricing and brokerage, platforms, account opening.",
            move |ctx, args: SearchFaqArgs| {
                let inner = inner.clone();
                async move { inner.search_faq(ctx, args).await }
            },
        );

        let inner = self.inner.clone();
        let save_lead = FunctionTool::typed(
            "save_lead",
            "Save the lead once the visitor is done and most details are known. Call only once.",
            move |ctx, args: SaveLeadArgs| {
                let inner = inner.clone();
                async move { inner.save_lead(ctx, args).await }
            },
        );

        vec![Arc::new(search_faq), Arc::new(save_lead)]
    }
}
