use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use eight_puzzle::utils::parse_board;
use eight_puzzle::{Board, Priority, Solver, SolverOptions};
use log::info;
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use std::fs;
use std::io::stdout;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PriorityArg {
    /// moves + manhattan
    Manhattan,
    /// moves + manhattan, ties broken by hamming
    Hamming,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Manhattan => Priority::Manhattan,
            PriorityArg::Hamming => Priority::ManhattanThenHamming,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve N×N sliding-tile puzzles", long_about = None)]
struct Args {
    /// Board file: the dimension N followed by N² tiles, 0 for the blank
    #[clap(required_unless_present = "random")]
    board_file: Option<PathBuf>,

    /// Solve a random solvable board of this size instead of reading a file
    #[clap(short, long, conflicts_with = "board_file")]
    random: Option<usize>,

    /// Seed for --random
    #[clap(short, long, requires = "random")]
    seed: Option<u64>,

    /// Frontier ordering
    #[clap(short, long, value_enum, default_value = "manhattan")]
    priority: PriorityArg,

    /// Give up after this many search rounds
    #[clap(long)]
    max_rounds: Option<u64>,

    /// Print the board's scores, twin and neighbors before solving
    #[clap(short, long)]
    inspect: bool,

    /// Print only the move count
    #[clap(short, long)]
    quiet: bool,
}

fn load_board(args: &Args) -> anyhow::Result<Board> {
    if let Some(size) = args.random {
        let board = match args.seed {
            Some(seed) => Board::random(size, &mut StdRng::seed_from_u64(seed)),
            None => Board::random(size, &mut thread_rng()),
        };
        return board.context("Failed to generate a random board");
    }

    let Some(path) = &args.board_file else {
        bail!("No board file given");
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read board file {}", path.display()))?;
    parse_board(&content).with_context(|| format!("Invalid board in {}", path.display()))
}

fn print_inspection(board: &Board) {
    println!("{}", board);
    println!("Board dimensions: {}x{}", board.dimension(), board.dimension());
    println!("Hamming score: {}", board.hamming());
    println!("Manhattan score: {}", board.manhattan());
    println!("Twin:\n{}", board.twin());
    println!("Neighbors:");
    for neighbor in board.neighbors() {
        println!("{}", neighbor);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = load_board(&args)?;
    if args.inspect {
        print_inspection(&board);
    }

    let options = SolverOptions {
        priority: args.priority.into(),
        max_rounds: args.max_rounds,
    };
    let solver = Solver::with_options(board, options).context("Search failed")?;
    info!("{:?}", solver.stats());

    let styled = stdout().is_tty();
    match (solver.moves(), solver.solution()) {
        (Some(moves), Some(path)) => {
            let header = format!("Minimum number of moves = {}", moves);
            if styled {
                println!("{}", header.green().bold());
            } else {
                println!("{}", header);
            }
            if !args.quiet {
                for board in path {
                    println!("{}", board);
                }
            }
        }
        _ => {
            let message = "No solution possible";
            if styled {
                println!("{}", message.red().bold());
            } else {
                println!("{}", message);
            }
        }
    }

    Ok(())
}
