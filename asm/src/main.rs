use lmcasm::{error::Error, util};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    input: String,

    /// Output file [default: standard output]
    #[clap(short, long)]
    output: Option<String>,

    /// Dump assembly listing to standard error
    #[clap(short, long)]
    dump: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    if let Err(err) = run(&args) {
        println!("{}", err.cformat(&args.input));
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    use std::io::Write;

    let src = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?;

    let asm = lmcasm::parse(src.lines())?;
    for warn in &asm.warnings {
        eprintln!("{}", warn.cformat(&args.input));
    }
    if args.dump {
        eprintln!("{}", util::dump(&asm, &args.input));
    }

    let words = asm.resolve()?;
    let text: String = words.iter().map(|w| format!("{}\n", w)).collect();

    match &args.output {
        Some(path) => {
            let mut file =
                std::fs::File::create(path).map_err(|e| Error::FileCreate(path.clone(), e))?;
            file.write_all(text.as_bytes())
                .map_err(|e| Error::FileWrite(path.clone(), e))?;
        }
        None => print!("{}", text),
    }
    Ok(())
}
