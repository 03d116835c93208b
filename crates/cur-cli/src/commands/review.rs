//! Interactive review loop.
//!
//! One record on screen at a time; single-word commands drive the session.
//! Evidence is picked by sentence number, so the reviewer never retypes
//! abstract text.

use std::fmt::Write as _;
use std::io::{self, BufRead, Write as _};

use chrono::Utc;

use crate::commands::{build_store, open_user_store, prompt, resolve_reviewer};
use cur_config::CuratorConfig;
use cur_core::enums::{Axis, AxisAValue, AxisBValue, ReviewAction, Subcategory};
use cur_engine::{Action, Notice, RenderPayload, ReviewSession, SaveOutcome, SentenceTag};

const HELP: &str = "\
commands:
  next | prev            move through the dataset
  jump <record-id>       go to a record by id
  keep <a|b>             keep the original classification for an axis
  change <a|b> <value>   reclassify an axis (a: human, non_human, unclear;
                         b: original, used, mixed, unclear)
  pick <a|b> <n>         add sentence n of the abstract to an axis's reason
  reason <a|b> <text>    overwrite an axis's reason text
  subs <list>            set subcategories, e.g. subs plants,animal
  save                   commit the judgment and advance
  progress               toggle the progress view
  help                   show this help
  quit                   end the session";

/// Parsed reviewer input, one line at a time.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Act(Vec<Action>),
    Pick { axis: Axis, number: usize },
    Save,
    Help,
    Quit,
    Noop,
}

pub async fn handle(config: &CuratorConfig, reviewer_flag: Option<&str>) -> anyhow::Result<()> {
    let reviewer = resolve_reviewer(config, reviewer_flag)?;

    let users = open_user_store(config)?;
    let password = prompt(&format!("Password for {reviewer}: "))?;
    if !users.verify(&reviewer, &password)? {
        anyhow::bail!("invalid credentials for '{reviewer}'");
    }

    let store = build_store(config)?;
    let mut session = ReviewSession::start(store, reviewer).await?;

    println!("{HELP}\n");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let payload = session.render();
        println!("{}", render_screen(&payload));
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        match parse_command(&line) {
            Ok(Command::Noop) => {}
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Ok(Command::Act(actions)) => {
                for action in actions {
                    report_notices(session.handle(action));
                }
            }
            Ok(Command::Pick { axis, number }) => {
                match number
                    .checked_sub(1)
                    .and_then(|i| payload.sentences.get(i))
                {
                    Some(sentence) => {
                        session.handle(Action::SelectSentence {
                            axis,
                            sentence: sentence.text.clone(),
                        });
                    }
                    None => println!("no sentence {number} in this abstract"),
                }
            }
            Ok(Command::Save) => match session.save(Utc::now()).await {
                Ok((outcome, notices)) => {
                    match outcome {
                        SaveOutcome::Appended(n) => println!("saved ({n} row added)"),
                        SaveOutcome::Created(n) => {
                            println!("ledger created, {n} row written");
                        }
                        SaveOutcome::NothingToAdd => {
                            println!("already judged, nothing added");
                        }
                    }
                    report_notices(notices);
                }
                Err(e) => {
                    let hint = match &e {
                        cur_engine::EngineError::Store(s) if s.is_retryable() => {
                            ", try 'save' again"
                        }
                        _ => "",
                    };
                    println!("warning: save failed, drafts kept{hint}: {e:#}");
                }
            },
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

fn report_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice {
            Notice::JumpTargetMissing { record_id } => {
                println!("warning: no record with id '{record_id}'");
            }
            Notice::ReviewComplete => println!("review complete — every record is judged"),
        }
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Command::Noop);
    };

    match verb {
        "next" | "n" => Ok(Command::Act(vec![Action::Next])),
        "prev" | "p" => Ok(Command::Act(vec![Action::Previous])),
        "jump" => {
            let id = words.next().ok_or("usage: jump <record-id>")?;
            Ok(Command::Act(vec![Action::JumpTo(id.to_string())]))
        }
        "keep" => {
            let axis = parse_axis(words.next())?;
            Ok(Command::Act(vec![Action::SetAction {
                axis,
                action: ReviewAction::KeepOriginal,
            }]))
        }
        "change" => {
            let axis = parse_axis(words.next())?;
            let value = words.next().ok_or("usage: change <a|b> <value>")?;
            let set_value = match axis {
                Axis::HumanNonHuman => Action::SetAxisAValue(
                    value.parse::<AxisAValue>().map_err(|e| e.to_string())?,
                ),
                Axis::DatasetType => Action::SetAxisBValue(
                    value.parse::<AxisBValue>().map_err(|e| e.to_string())?,
                ),
            };
            Ok(Command::Act(vec![
                Action::SetAction {
                    axis,
                    action: ReviewAction::ChangeClassification,
                },
                set_value,
            ]))
        }
        "pick" => {
            let axis = parse_axis(words.next())?;
            let number = words
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or("usage: pick <a|b> <sentence-number>")?;
            Ok(Command::Pick { axis, number })
        }
        "reason" => {
            let axis = parse_axis(words.next())?;
            let text = words.collect::<Vec<_>>().join(" ");
            Ok(Command::Act(vec![Action::EditReason { axis, text }]))
        }
        "subs" => {
            let list = words.next().unwrap_or_default();
            let subcategories = list
                .split(',')
                .filter(|s| !s.is_empty())
                .map(|s| s.trim().parse::<Subcategory>().map_err(|e| e.to_string()))
                .collect::<Result<_, _>>()?;
            Ok(Command::Act(vec![Action::SetSubcategories(subcategories)]))
        }
        "progress" => Ok(Command::Act(vec![Action::ToggleProgressView])),
        "save" | "s" => Ok(Command::Save),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn parse_axis(word: Option<&str>) -> Result<Axis, String> {
    match word {
        Some("a") => Ok(Axis::HumanNonHuman),
        Some("b") => Ok(Axis::DatasetType),
        _ => Err("expected an axis: 'a' (human/non-human) or 'b' (dataset type)".to_string()),
    }
}

fn render_screen(payload: &RenderPayload) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "--- record {}/{} — {} ---",
        payload.index + 1,
        payload.total,
        payload.record.id
    );
    let _ = writeln!(out, "{}", payload.record.title);

    for (i, sentence) in payload.sentences.iter().enumerate() {
        let marker = match sentence.tag {
            SentenceTag::SelectedForNewReason => "*",
            SentenceTag::MatchesOriginalAxisAReason => "A",
            SentenceTag::MatchesOriginalAxisBReason => "B",
            SentenceTag::Plain => " ",
        };
        let _ = writeln!(out, "  {:>2}. [{marker}] {}", i + 1, sentence.text);
    }

    let _ = writeln!(
        out,
        "axis a: {} (original: {} — {})",
        axis_line(
            payload.axis_a.action,
            payload.axis_a.new_value.as_str(),
            &payload.axis_a.reason
        ),
        payload.record.original_axis_a,
        payload.record.original_axis_a_reason
    );
    let _ = writeln!(
        out,
        "axis b: {} (original: {} — {})",
        axis_line(
            payload.axis_b.action,
            payload.axis_b.new_value.as_str(),
            &payload.axis_b.reason
        ),
        payload.record.original_axis_b,
        payload.record.original_axis_b_reason
    );

    if !payload.subcategories.is_empty() {
        let subs = payload
            .subcategories
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "subcategories: {subs}");
    }

    let _ = write!(
        out,
        "progress: {}/{} done, {} remaining",
        payload.progress.completed, payload.progress.total, payload.progress.remaining
    );

    if let Some(detail) = &payload.progress_detail {
        let _ = write!(out, "\ncompleted: {}", detail.completed.join(", "));
        let remaining = detail
            .remaining
            .iter()
            .map(|(id, _)| id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(out, "\nremaining: {remaining}");
    }

    out
}

fn axis_line(action: ReviewAction, new_value: &str, reason: &str) -> String {
    match action {
        ReviewAction::KeepOriginal => "keep original".to_string(),
        ReviewAction::ChangeClassification => format!("change to {new_value} — \"{reason}\""),
    }
}
