//! Bank fraud-alert caller working through one flagged transaction.

use crate::render_with;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply, VdkError};
use vdk_session::check_transition;
use vdk_store::RecordStore;
use vdk_tool::FunctionTool;

const INSTRUCTIONS: &str = "You are a fraud alert representative for a fictional Indian bank called {bank}.
You are calling a customer about a suspicious card transaction.

Call flow:
1) Greet professionally: 'This is the fraud monitoring desk at {bank}.'
2) Ask for the customer's first name and load their case with `load_case`.
3) Ask one non-sensitive verification question taken from the case.
4) If the answer is wrong, end politely and record the status verification_failed.
5) If verification passes, read out the suspicious transaction: merchant, amount, location, time and the masked card ending.
6) Ask: 'Did you make this transaction?'
7) If yes, mark it confirmed_safe. If no, mark it confirmed_fraud and explain that the card is blocked and a dispute has been raised.
8) Call `update_case_status` exactly once at the end of the call.

Rules:
- Never ask for a PIN, full card number, password, OTP or anything else sensitive.
- Stay calm, professional and reassuring.
- Keep responses short.";

const NOT_FOUND: &str = "I could not find a case for that name. Please try again.";
const UPDATED: &str = "The fraud case has been updated.";
const UPDATE_NOT_FOUND: &str = "I could not update the case because the user was not found.";
const UPDATE_FAILED: &str = "I could not save the case update right now.";
const LOAD_FIRST: &str = "Please load the customer's case before updating it.";

/// A seeded fraud case. Fields other than the name, status, and outcome are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudCase {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "outcomeNote", default, skip_serializing_if = "Option::is_none")]
    pub outcome_note: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl FraudCase {
    pub fn belongs_to(&self, user_name: &str) -> bool {
        self.user_name.to_lowercase() == user_name.to_lowercase()
    }
}

#[derive(Debug, Default)]
struct FraudState {
    current_case: Option<FraudCase>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoadCaseArgs {
    /// Customer's first name as they said it
    pub user_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCaseStatusArgs {
    pub user_name: String,
    /// confirmed_safe, confirmed_fraud or verification_failed
    pub status: String,
    /// Short note describing how the call ended
    #[serde(rename = "outcomeNote")]
    pub outcome_note: String,
}

struct FraudInner {
    cases: Arc<dyn RecordStore<FraudCase>>,
    state: Mutex<FraudState>,
}

impl FraudInner {
    fn state(&self) -> std::sync::MutexGuard<'_, FraudState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn load_case(&self, _ctx: Arc<dyn ToolContext>, args: LoadCaseArgs) -> Result<ToolReply> {
        let user_name = args.user_name;
        let lookup = user_name.clone();
        let found =
            self.cases.find_first(Box::new(move |c: &FraudCase| c.belongs_to(&lookup))).await;

        let Some(case) = found else {
            return Err(VdkError::NotFound(NOT_FOUND.to_string()));
        };

        self.state().current_case = Some(case.clone());
        Ok(ToolReply::new(
            format!(
                "I have located your case for {}. Please answer a simple verification question next.",
                user_name
            ),
            json!(case),
        ))
    }

    async fn update_case_status(
        &self,
        ctx: Arc<dyn ToolContext>,
        args: UpdateCaseStatusArgs,
    ) -> Result<ToolReply> {
        let loaded = self
            .state()
            .current_case
            .as_ref()
            .is_some_and(|c| c.belongs_to(&args.user_name));
        check_transition(ctx.as_ref(), "update_case_status", loaded, LOAD_FIRST)?;

        let lookup = args.user_name.clone();
        let status = args.status.clone();
        let note = args.outcome_note.clone();
        let updated = self
            .cases
            .update_first(
                Box::new(move |c: &FraudCase| c.belongs_to(&lookup)),
                Box::new(move |c: &mut FraudCase| {
                    c.status = Some(status);
                    c.outcome_note = Some(note);
                }),
            )
            .await
            .map_err(|e| {
                error!(store = %self.cases.location(), error = %e, "failed to update fraud case");
                VdkError::Storage(UPDATE_FAILED.to_string())
            })?;

        let Some(case) = updated else {
            return Err(VdkError::NotFound(UPDATE_NOT_FOUND.to_string()));
        };

        info!(user = %case.user_name, status = %args.status, "fraud case updated");
        let mut state = self.state();
        if state.current_case.as_ref().is_some_and(|c| c.belongs_to(&case.user_name)) {
            state.current_case = Some(case.clone());
        }
        Ok(ToolReply::new(UPDATED, json!(case)))
    }

    fn snapshot(&self) -> Value {
        json!({ "current_case": self.state().current_case })
    }
}

pub struct FraudAgent {
    instructions: String,
    inner: Arc<FraudInner>,
}

impl FraudAgent {
    pub fn new(bank: &str, cases: Arc<dyn RecordStore<FraudCase>>) -> Result<Self> {
        Ok(Self {
            instructions: render_with(INSTRUCTIONS, "bank", bank)?,
            inner: Arc::new(FraudInner { cases, state: Mutex::new(FraudState::default()) }),
        })
    }
}

impl Persona for FraudAgent {
    fn name(&self) -> &str {
        "fraud"
    }

    fn description(&self) -> &str {
        "Verifies a customer and resolves a suspicious card transaction"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let load_case = FunctionTool::typed(
            "load_case",
            "Load the fraud case for the customer's first name.",
            move |ctx, args: LoadCaseArgs| {
                let inner = inner.clone();
                async move { inner.load_case(ctx, args).await }
            },
        );

        let inner = self.inner.clone();
        let update = FunctionTool::typed(
            "update_case_status",
            "Record the outcome of the call on the customer's case. Call exactly once.",
            move |ctx, args: UpdateCaseStatusArgs| {
                let inner = inner.clone();
                async move { inner.update_case_status(ctx, args).await }
            },
        );

        vec![Arc::new(load_case), Arc::new(update)]
    }

    fn snapshot(&self) -> Value {
        self.inner.snapshot()
    }
}
