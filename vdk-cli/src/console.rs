use anyhow::{Context, Result, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde_json::Value;
use vdk_core::FunctionCall;
use vdk_session::Session;

/// One line of console input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Empty,
    Call(FunctionCall),
    State,
    Events,
    Tools,
    Help,
    Quit,
}

const HELP: &str = "Enter `tool_name {json args}` to call a tool, for example:
  add_item {\"item_id\": \"milk_1l\", \"quantity\": 2}
  show_cart
Commands: :state  :events  :tools  :help  :quit";

pub fn parse_line(line: &str) -> Result<ConsoleInput> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleInput::Empty);
    }

    if let Some(command) = line.strip_prefix(':') {
        return match command.trim() {
            "state" => Ok(ConsoleInput::State),
            "events" => Ok(ConsoleInput::Events),
            "tools" => Ok(ConsoleInput::Tools),
            "help" | "?" => Ok(ConsoleInput::Help),
            "quit" | "q" | "exit" => Ok(ConsoleInput::Quit),
            other => bail!("unknown command ':{}'", other),
        };
    }

    let (name, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim()),
        None => (line, ""),
    };

    let args = if rest.is_empty() {
        Value::Null
    } else {
        let args: Value = serde_json::from_str(rest)
            .with_context(|| format!("arguments for {} are not valid JSON", name))?;
        if !args.is_object() {
            bail!("arguments for {} must be a JSON object", name);
        }
        args
    };

    Ok(ConsoleInput::Call(FunctionCall::new(name, args)))
}

pub async fn run_console(session: &Session) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("VDK Console");
    println!("Persona: {} (session {})", session.persona().name(), session.id());
    println!("Tools: {}", session.tool_names().join(", "));
    println!("{}\n", HELP);

    loop {
        let readline = rl.readline("call -> ");
        match readline {
            Ok(line) => {
                let input = match parse_line(&line) {
                    Ok(input) => input,
                    Err(e) => {
                        eprintln!("Error: {:#}", e);
                        continue;
                    }
                };
                if input != ConsoleInput::Empty {
                    rl.add_history_entry(line.as_str())?;
                }

                match input {
                    ConsoleInput::Empty => {}
                    ConsoleInput::Call(call) => {
                        let response = session.call(call).await;
                        println!("{}\n", serde_json::to_string_pretty(&response.response)?);
                    }
                    ConsoleInput::State => {
                        println!("{}\n", serde_json::to_string_pretty(&session.state())?)
                    }
                    ConsoleInput::Events => {
                        println!("{}\n", serde_json::to_string_pretty(&session.events().await)?)
                    }
                    ConsoleInput::Tools => {
                        println!("{}\n", serde_json::to_string_pretty(&session.declarations())?)
                    }
                    ConsoleInput::Help => println!("{}\n", HELP),
                    ConsoleInput::Quit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("EOF");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    Ok(())
}
