//! Improv game-show host running a fixed number of scenario rounds.
//!
//! Phases move `intro -> awaiting_improv -> reacting -> ... -> done`. Under
//! the enforced policy out-of-order calls are rejected; otherwise they are
//! logged and allowed.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use vdk_core::{Persona, Result, Tool, ToolContext, ToolReply};
use vdk_session::check_transition;
use vdk_tool::FunctionTool;

const INSTRUCTIONS: &str = "You are the host of a TV improv show called 'Improv Battle'.

Persona:
- High-energy, witty and clear about the rules.
- Your reactions are realistic and varied: sometimes amused, sometimes unimpressed, sometimes pleasantly surprised.
- Light teasing and honest critique are fine. Stay respectful and constructive.

Game flow:
1. Introduce the show and explain the rules.
2. Run exactly {max_rounds} rounds.
3. For each round: set the scene with the scenario from `get_next_scenario`, tell the player to start improvising, and when they finish give your reaction on what worked, what was odd, or what fell flat.
4. After your reaction, call `record_round` and then move on to the next round or wrap up the show.
5. After the final round, give a two or three sentence summary of the player's improv style.
6. If the player says 'stop game' or 'end show', call `end_game` immediately.

State:
- Call `start_game` as soon as you learn the player's name.
- Call `get_next_scenario` to fetch each round's scenario.
- Stop after the last round.";

pub struct Scenario {
    pub id: &'static str,
    pub text: &'static str,
}

pub const SCENARIOS: [Scenario; 5] = [
    Scenario {
        id: "barista_portal",
        text: "You are a barista who must calmly explain to a customer that their latte is actually a portal to another dimension.",
    },
    Scenario {
        id: "time_travel_guide",
        text: "You are a time-traveling tour guide explaining modern smartphones to someone from the 1800s.",
    },
    Scenario {
        id: "escaped_order",
        text: "You are a restaurant waiter who must politely inform a customer that their order has escaped the kitchen and is now loose in the dining room.",
    },
    Scenario {
        id: "cursed_return",
        text: "You are a customer trying to return an obviously cursed object to a very skeptical shop owner.",
    },
    Scenario {
        id: "alien_job_interview",
        text: "You are a human resources manager interviewing an alien who has never had a job before.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Intro,
    AwaitingImprov,
    Reacting,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub scenario_id: String,
    pub host_reaction: String,
    pub player_performance_notes: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovState {
    pub player_name: Option<String>,
    pub current_round: u32,
    pub max_rounds: u32,
    pub rounds: Vec<RoundRecord>,
    pub phase: GamePhase,
}

impl ImprovState {
    pub fn new(max_rounds: u32) -> Self {
        Self {
            player_name: None,
            current_round: 0,
            max_rounds,
            rounds: Vec::new(),
            phase: GamePhase::Intro,
        }
    }

    fn rounds_exhausted(&self) -> bool {
        self.current_round >= self.max_rounds
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StartGameArgs {
    pub player_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecordRoundArgs {
    /// Id of the scenario that was just played
    pub scenario_id: String,
    /// What the host said about the performance
    pub host_reaction: String,
    /// Short notes on how the player did
    pub player_performance_notes: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EndGameArgs {
    /// Why the game ended early
    pub reason: Option<String>,
}

struct ImprovInner {
    state: Mutex<ImprovState>,
}

impl ImprovInner {
    fn state(&self) -> MutexGuard<'_, ImprovState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn start_game(&self, ctx: &dyn ToolContext, args: StartGameArgs) -> Result<ToolReply> {
        let mut state = self.state();
        let open = state.phase != GamePhase::Done;
        check_transition(ctx, "start_game", open, "The show is already over.")?;

        state.player_name = Some(args.player_name.clone());
        state.phase = GamePhase::AwaitingImprov;
        Ok(ToolReply::new(
            format!("Welcome to Improv Battle, {}!", args.player_name),
            json!({
                "status": "started",
                "player_name": args.player_name,
                "max_rounds": state.max_rounds,
            }),
        ))
    }

    fn get_next_scenario(&self, ctx: &dyn ToolContext) -> Result<ToolReply> {
        let mut state = self.state();
        if state.rounds_exhausted() {
            return Ok(ToolReply::new(
                "Game finished",
                json!({ "status": "complete", "message": "Game finished" }),
            ));
        }

        let started = state.player_name.is_some() && state.phase != GamePhase::Done;
        check_transition(
            ctx,
            "get_next_scenario",
            started,
            "Start the game before asking for a scenario.",
        )?;

        let scenario = &SCENARIOS[state.current_round as usize % SCENARIOS.len()];
        state.current_round += 1;
        if state.phase != GamePhase::Done {
            state.phase = GamePhase::AwaitingImprov;
        }
        Ok(ToolReply::new(
            scenario.text,
            json!({
                "round": state.current_round,
                "scenario": scenario.text,
                "scenario_id": scenario.id,
            }),
        ))
    }

    fn record_round(&self, ctx: &dyn ToolContext, args: RecordRoundArgs) -> Result<ToolReply> {
        let mut state = self.state();
        let in_round = state.phase == GamePhase::AwaitingImprov && state.current_round >= 1;
        check_transition(
            ctx,
            "record_round",
            in_round,
            "There is no round in progress to record.",
        )?;

        let round_number = state.current_round;
        state.rounds.push(RoundRecord {
            round_number,
            scenario_id: args.scenario_id,
            host_reaction: args.host_reaction,
            player_performance_notes: args.player_performance_notes,
            completed_at: Utc::now(),
        });
        if state.phase != GamePhase::Done {
            state.phase =
                if state.rounds_exhausted() { GamePhase::Done } else { GamePhase::Reacting };
        }

        let game_complete = state.phase == GamePhase::Done;
        Ok(ToolReply::new(
            format!("Round {} recorded.", round_number),
            json!({ "status": "recorded", "round": round_number, "game_complete": game_complete }),
        ))
    }

    fn end_game(&self, args: EndGameArgs) -> Result<ToolReply> {
        let mut state = self.state();
        state.phase = GamePhase::Done;
        let reason = args.reason.unwrap_or_else(|| "Player requested exit".to_string());
        Ok(ToolReply::new(
            "Thanks for playing Improv Battle!",
            json!({ "status": "ended", "reason": reason, "rounds_completed": state.rounds.len() }),
        ))
    }
}

pub struct ImprovHost {
    instructions: String,
    inner: Arc<ImprovInner>,
}

impl ImprovHost {
    pub fn new(max_rounds: u32) -> Result<Self> {
        let instructions = crate::render_with(INSTRUCTIONS, "max_rounds", &max_rounds.to_string())?;
        Ok(Self {
            instructions,
            inner: Arc::new(ImprovInner { state: Mutex::new(ImprovState::new(max_rounds)) }),
        })
    }

    pub fn state(&self) -> ImprovState {
        self.inner.state().clone()
    }
}

impl Persona for ImprovHost {
    fn name(&self) -> &str {
        "improv"
    }

    fn description(&self) -> &str {
        "Hosts an improv game show over a fixed number of scenario rounds"
    }

    fn instructions(&self) -> String {
        self.instructions.clone()
    }

    fn tools(&self) -> Vec<Arc<dyn Tool>> {
        let inner = self.inner.clone();
        let start_game = FunctionTool::typed(
            "start_game",
            "Start the game once the player's name is known.",
            move |ctx, args: StartGameArgs| {
                let inner = inner.clone();
                async move { inner.start_game(ctx.as_ref(), args) }
            },
        );

        let inner = self.inner.clone();
        let next = FunctionTool::new(
            "get_next_scenario",
            "Fetch the scenario for the next round.",
            move |ctx, _args| {
                let inner = inner.clone();
                async move { inner.get_next_scenario(ctx.as_ref()) }
            },
        );

        let inner = self.inner.clone();
        let record_round = FunctionTool::typed(
            "record_round",
            "Record the finished round with the host's reaction.",
            move |ctx, args: RecordRoundArgs| {
                let inner = inner.clone();
                async move { inner.record_round(ctx.as_ref(), args) }
            },
        );

        let inner = self.inner.clone();
        let end_game = FunctionTool::typed(
            "end_game",
            "End the game early when the player asks to stop.",
            move |_ctx, args: EndGameArgs| {
                let inner = inner.clone();
                async move { inner.end_game(args) }
            },
        );

        vec![Arc::new(start_game), Arc::new(next), Arc::new(record_round), Arc::new(end_game)]
    }

    fn snapshot(&self) -> Value {
        json!(self.state())
    }
}
