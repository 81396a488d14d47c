#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use garde::{
    daily_loads, fixtures, io,
    model::{ActorId, ActorProfile, Board, Shift, ShiftId, TradeId},
    scheduler::{RestPolicy, Scheduler},
    WorkloadSummary,
};
use serde::Deserialize;
use std::collections::HashMap;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de gardes hospitalières : repos minimal et échanges (sans persistance)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Profil JSON (`actor`, `display_name`, `department`), prioritaire sur les options
    #[arg(long, global = true)]
    profile: Option<String>,

    #[arg(long, global = true, env = "GARDE_ACTOR", default_value = "you")]
    actor: String,

    #[arg(long, global = true, env = "GARDE_NAME", default_value = "Dr. Smith")]
    name: String,

    #[arg(long, global = true, env = "GARDE_DEPARTMENT", default_value = "Cardiology")]
    department: String,

    #[arg(long, global = true, default_value_t = 11)]
    min_rest_hours: u32,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Vérifier le repos minimal d'une nouvelle garde contre un CSV existant
    Check {
        /// RFC3339 UTC
        #[arg(long)]
        start: String,
        /// RFC3339 UTC
        #[arg(long)]
        end: String,
        /// CSV `start,end,department`
        #[arg(long)]
        shifts: String,
    },

    /// Écrire le board d'exemple en JSON
    Seed {
        #[arg(long)]
        out: String,
        /// Instant de référence (RFC3339 UTC), maintenant par défaut
        #[arg(long)]
        now: Option<String>,
    },

    /// Rejouer un script d'actions JSON sur un board
    Run {
        #[arg(long)]
        script: String,
        /// Board JSON de départ (board d'exemple sinon)
        #[arg(long)]
        board: Option<String>,
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_shifts: Option<String>,
        #[arg(long)]
        out_trades: Option<String>,
    },

    /// Bilan de charge travail / repos
    Workload {
        #[arg(long)]
        shifts: String,
        /// Premier jour (AAAA-MM-JJ)
        #[arg(long)]
        from: String,
        #[arg(long, default_value_t = 30)]
        days: u32,
    },
}

/// Action d'un script `run`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    AddShift {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    RemoveShift {
        shift: String,
    },
    Propose {
        offered: Option<String>,
        #[serde(default)]
        requested: Option<String>,
        /// acteur courant par défaut
        #[serde(default)]
        proposer: Option<String>,
        /// nom utilisable par `accept` / `decline`
        #[serde(default)]
        alias: Option<String>,
    },
    Accept {
        trade: String,
    },
    Decline {
        trade: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let profile = load_profile(&cli)?;
    let policy = RestPolicy {
        min_rest_hours: cli.min_rest_hours,
    };

    let code = match cli.cmd {
        Commands::Check { start, end, shifts } => {
            let start: DateTime<Utc> = start.parse().context("start RFC3339")?;
            let end: DateTime<Utc> = end.parse().context("end RFC3339")?;
            let existing = io::import_shifts_csv(&shifts)?;
            let board = Board {
                mine: existing,
                ..Board::default()
            };
            let mut scheduler = Scheduler::with_board(profile, board).with_policy(policy);
            match scheduler.add_shift(start, end) {
                Ok(_) => {
                    println!("OK: no rest conflict");
                    0
                }
                Err(e) => {
                    eprintln!("{e}");
                    2
                }
            }
        }
        Commands::Seed { out, now } => {
            let now = parse_now(now.as_deref())?;
            let board = fixtures::sample_board(&profile, now);
            io::export_board_json(&out, &board)?;
            println!("Sample board written to {out}");
            0
        }
        Commands::Run {
            script,
            board,
            now,
            out_json,
            out_shifts,
            out_trades,
        } => {
            let board = match board {
                Some(path) => io::import_board_json(path)?,
                None => fixtures::sample_board(&profile, parse_now(now.as_deref())?),
            };
            let data = std::fs::read(&script).with_context(|| format!("reading {script}"))?;
            let actions: Vec<Action> =
                serde_json::from_slice(&data).with_context(|| "parsing script json")?;

            let mut scheduler = Scheduler::with_board(profile, board).with_policy(policy);
            let failures = run_script(&mut scheduler, actions);
            print_board(&scheduler);

            if let Some(path) = out_json {
                io::export_board_json(path, scheduler.board())?;
            }
            if let Some(path) = out_shifts {
                io::export_shifts_csv(path, scheduler.board())?;
            }
            if let Some(path) = out_trades {
                io::export_trades_csv(path, scheduler.board())?;
            }
            // Code 2 = au moins une action refusée
            if failures > 0 {
                2
            } else {
                0
            }
        }
        Commands::Workload { shifts, from, days } => {
            let shifts = io::import_shifts_csv(&shifts)?;
            let from = NaiveDate::parse_from_str(&from, "%Y-%m-%d")
                .with_context(|| format!("invalid date: {from}"))?;
            let summary = WorkloadSummary::from_days(&daily_loads(&shifts, from, days));
            println!(
                "work {:.0}h | rest {:.0}h | index {:.2} | {}",
                summary.total_work_hours,
                summary.total_off_hours,
                summary.work_index,
                summary.status.message()
            );
            0
        }
    };

    std::process::exit(code);
}

fn load_profile(cli: &Cli) -> Result<ActorProfile> {
    if let Some(path) = &cli.profile {
        let data = std::fs::read(path).with_context(|| format!("reading {path}"))?;
        return serde_json::from_slice(&data).with_context(|| "parsing profile json");
    }
    Ok(ActorProfile::new(
        ActorId::new(&cli.actor),
        cli.name.clone(),
        cli.department.clone(),
    ))
}

fn parse_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => raw.parse().context("now RFC3339"),
        None => Ok(Utc::now()),
    }
}

/// Applique les actions dans l'ordre ; retourne le nombre d'actions refusées.
fn run_script(scheduler: &mut Scheduler, actions: Vec<Action>) -> usize {
    let mut aliases: HashMap<String, TradeId> = HashMap::new();
    let mut failures = 0usize;

    for action in actions {
        let (label, outcome) = match action {
            Action::AddShift { start, end } => (
                "add_shift",
                scheduler.add_shift(start, end).map(|id| id.to_string()),
            ),
            Action::RemoveShift { shift } => (
                "remove_shift",
                scheduler
                    .remove_shift(&ShiftId::new(&shift))
                    .map(|s: Shift| s.id.to_string()),
            ),
            Action::Propose {
                offered,
                requested,
                proposer,
                alias,
            } => {
                let offered = offered.map(ShiftId::new);
                let requested = requested.map(ShiftId::new);
                let proposer = proposer
                    .map(ActorId::new)
                    .unwrap_or_else(|| scheduler.profile().actor.clone());
                let outcome = scheduler
                    .propose_trade(offered.as_ref(), requested.as_ref(), &proposer)
                    .map(|id| {
                        if let Some(alias) = alias {
                            aliases.insert(alias, id.clone());
                        }
                        id.to_string()
                    });
                ("propose", outcome)
            }
            Action::Accept { trade } => {
                let id = resolve_trade(&aliases, &trade);
                ("accept", scheduler.accept_trade(&id).map(|_| id.to_string()))
            }
            Action::Decline { trade } => {
                let id = resolve_trade(&aliases, &trade);
                ("decline", scheduler.decline_trade(&id).map(|_| id.to_string()))
            }
        };

        match outcome {
            Ok(detail) => println!("ok   {label} {detail}"),
            Err(e) => {
                failures += 1;
                println!("fail {label} [{:?}] {e}", e.kind());
            }
        }
    }

    failures
}

fn resolve_trade(aliases: &HashMap<String, TradeId>, raw: &str) -> TradeId {
    aliases.get(raw).cloned().unwrap_or_else(|| TradeId::new(raw))
}

fn print_board(scheduler: &Scheduler) {
    let board = scheduler.board();
    println!("-- mine ({})", board.mine.len());
    for s in Board::sorted_by_start(&board.mine) {
        println!(
            "{} | {} → {} | {} | {}h",
            s.id,
            s.start.to_rfc3339(),
            s.end.to_rfc3339(),
            s.department,
            s.duration_hours()
        );
    }
    println!("-- available ({})", board.available.len());
    for s in Board::sorted_by_start(&board.available) {
        println!("{} | {} → {} | {}", s.id, s.start.to_rfc3339(), s.end.to_rfc3339(), s.department);
    }
    println!("-- trades ({} pending incoming)", scheduler.pending_incoming_count());
    for t in scheduler.trade_history() {
        println!(
            "{} | from {} | {} | {}",
            t.id,
            t.sender,
            t.original_shift.id,
            t.status()
        );
    }
}
