use arch::Word;
use clap::Parser;
use color_print::ceprintln;

use lmcemu::error::Error;
use lmcemu::hooks::{dump::Dump, Hook};
use lmcemu::input::{Console, Input};
use lmcemu::model::State;

#[derive(Parser, Debug)]
#[clap(name = "LMC Emulator", version, about = "Emulator for the LMC architecture")]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// YAML file: address -> memory cells to print when it executes
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Print pc and acc after every instruction
    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Values for INP, used before prompting
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    input: Vec<Word>,

    /// Machine code file, or `-` for standard input (non-interactive)
    input_file: String,
}

fn main() {
    let args = Args::parse();

    let mut state = match setup(&args) {
        Ok(state) => state,
        Err(err) => {
            ceprintln!("<red,bold>error</>: {}", err);
            std::process::exit(1);
        }
    };

    let result = Dump::arg(args.dump_cfg.clone(), args.dump_all).and_then(|dump| {
        let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(dump)];
        lmcemu::run(&mut state, &mut hooks, args.tmax)
    });

    for value in state.output() {
        println!("{}", value);
    }
    if let Err(err) = result {
        ceprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

/// Load memory and pick the input mode from where the program comes from.
fn setup(args: &Args) -> Result<State, Error> {
    use std::io::Read;

    let values = args.input.iter().copied();
    let (text, input) = if args.input_file == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(Error::Io)?;
        (text, Input::batch(values))
    } else {
        let text = std::fs::read_to_string(&args.input_file)
            .map_err(|e| Error::FileOpen(args.input_file.clone(), e))?;
        let console = Console::new(std::io::stdin().lock(), std::io::stderr());
        (text, Input::interactive(values, Box::new(console)))
    };
    Ok(State::new(lmcemu::load(&text)?, input))
}
