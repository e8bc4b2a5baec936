// vim: set ai et ts=4 sts=4 sw=4:
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process;
use std::str::FromStr;
use clap::{App, Arg};

use picross::puzzle::{Puzzle, Outcome, ParseError};
use picross::ui::Animation;
use picross::util::is_a_tty;

pub struct Args {
    pub input_path: Option<String>,
    pub yaml: bool,
    pub pretty: bool,
    pub visual_groups: Option<usize>,
    pub no_anim: bool,
    pub delay_ms: u64,
    pub verbosity: u64,
}

fn parse_args() -> Args {
    let matches = App::new("picross")
        .version("0.1.0")
        .about("Solves nonogram (picross) puzzles")
        .arg(Arg::with_name("FILE")
             .help("Puzzle file to read; stdin when absent"))
        .arg(Arg::with_name("yaml")
             .long("yaml")
             .help("Treat the input as a YAML puzzle document"))
        .arg(Arg::with_name("pretty")
             .long("pretty")
             .short("p")
             .help("Render the board with clue headers and borders"))
        .arg(Arg::with_name("groups")
             .long("groups")
             .short("g")
             .takes_value(true)
             .value_name("N")
             .help("In pretty output, draw a subdivision rule every N squares"))
        .arg(Arg::with_name("no-anim")
             .long("no-anim")
             .help("Never animate propagation, even on a tty"))
        .arg(Arg::with_name("delay")
             .long("delay")
             .takes_value(true)
             .value_name("MS")
             .help("Milliseconds to pause between animation frames"))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Increase log verbosity (-v, -vv, -vvv)"))
        .get_matches();

    fn numeric<T: FromStr>(value: Option<&str>, option: &str) -> Option<T> {
        value.map(|s| match s.parse::<T>() {
            Ok(n)  => n,
            Err(_) => {
                eprintln!("invalid value for {}: {:?}", option, s);
                process::exit(2);
            }
        })
    }

    Args {
        input_path: matches.value_of("FILE").map(String::from),
        yaml: matches.is_present("yaml"),
        pretty: matches.is_present("pretty"),
        visual_groups: numeric(matches.value_of("groups"), "--groups"),
        no_anim: matches.is_present("no-anim"),
        delay_ms: numeric(matches.value_of("delay"), "--delay").unwrap_or(0),
        verbosity: matches.occurrences_of("verbose"),
    }
}

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:5}] {}", record.level(), message))
        })
        .level(level)
        .chain(io::stderr()) // keep stdout clean for the board
        .apply()
}

fn read_puzzle(args: &Args) -> Result<Puzzle, ParseError> {
    match &args.input_path {
        Some(path) => {
            let file = File::open(path)?;
            if args.yaml || path.ends_with(".yaml") || path.ends_with(".yml") {
                let mut source = String::new();
                BufReader::new(file).read_to_string(&mut source)?;
                Puzzle::from_yaml_str(&source)
            } else {
                Puzzle::from_text(BufReader::new(file))
            }
        }
        None => {
            let stdin = io::stdin();
            if args.yaml {
                let mut source = String::new();
                stdin.lock().read_to_string(&mut source)?;
                Puzzle::from_yaml_str(&source)
            } else {
                Puzzle::from_text(stdin.lock())
            }
        }
    }
}

fn main() {
    let args = parse_args();
    setup_logging(args.verbosity).expect("logging setup failed");

    let mut puzzle = match read_puzzle(&args) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    let mut anim = Animation::auto(args.no_anim, args.delay_ms);
    let outcome = puzzle.solve(&mut anim);
    anim.finish();

    if outcome == Outcome::Impossible {
        println!("IMPOSSIBLE!");
        println!("Last state:");
    }
    if args.pretty {
        print!("{}", puzzle.render_pretty(args.visual_groups, is_a_tty(io::stdout())));
    } else {
        print!("{}", puzzle.grid.render_plain());
    }
}
