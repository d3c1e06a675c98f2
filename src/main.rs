//! Mortgage Cost CLI
//!
//! Command-line interface for pricing single loans, previewing program fees
//! and running CSV batches

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};

use mortgage_cost::loan::load_loans;
use mortgage_cost::report::{render_breakdown, render_program_fee};
use mortgage_cost::{BatchRunner, LoanInput, ProgramType, RateTables};

#[derive(Parser, Debug)]
#[command(name = "mortgage-cost", version, about = "Mortgage loan cost calculator")]
struct Cli {
    #[arg(long, global = true, help = "Directory containing a rates.csv override")]
    rates: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price a single loan
    Calc {
        #[command(flatten)]
        loan: LoanArgs,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Show the upfront fee the program finances (FHA MIP or VA funding fee)
    Fee {
        #[arg(long, help = "Purchase price in dollars")]
        price: f64,
        #[arg(long, help = "Down payment percent (3.5 for 3.5%)")]
        down: f64,
        #[arg(long, default_value = "CONV", help = "Loan program: CONV, FHA or VA")]
        program: String,
        #[arg(long, value_enum, default_value_t = VaUse::First)]
        va_use: VaUse,
    },
    /// Price every loan in a scenario CSV
    Batch {
        input: PathBuf,
        #[arg(long, short, help = "Output CSV (defaults to stdout)")]
        output: Option<PathBuf>,
    },
    /// Print the active rate tables
    Rates {
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long, help = "Purchase price in dollars")]
    price: f64,
    #[arg(long, help = "Down payment percent (3.5 for 3.5%)")]
    down: f64,
    #[arg(long, help = "Annual interest rate percent (6 for 6%)")]
    rate: f64,
    #[arg(long, default_value_t = 30, help = "Term in years")]
    term: u32,
    #[arg(long, help = "Annual property tax rate as a decimal (0.0125 for 1.25%)")]
    tax_rate: f64,
    #[arg(long, default_value = "CONV", help = "Loan program: CONV, FHA or VA")]
    program: String,
    #[arg(long, value_enum, default_value_t = VaUse::First)]
    va_use: VaUse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VaUse {
    First,
    Subsequent,
}

impl VaUse {
    fn is_first(self) -> bool {
        matches!(self, VaUse::First)
    }
}

impl LoanArgs {
    fn to_input(&self) -> LoanInput {
        LoanInput::new(
            self.price,
            self.down,
            self.rate,
            self.term,
            self.tax_rate,
            ProgramType::from_code(&self.program),
        )
        .with_va_first_time_use(self.va_use.is_first())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rates = match &cli.rates {
        Some(dir) => RateTables::from_csv_path(dir)
            .with_context(|| format!("Failed to load rates from {}", dir.display()))?,
        None => RateTables::standard(),
    };
    let runner = BatchRunner::with_rates(rates);

    match cli.command {
        Commands::Calc { loan, json } => {
            let breakdown = runner.run(&loan.to_input());
            if !breakdown.is_finite() {
                eprintln!("warning: inputs produced non-finite amounts");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                print!("{}", render_breakdown(&breakdown));
            }
        }
        Commands::Fee { price, down, program, va_use } => {
            // Rate, term and tax do not affect the upfront fee
            let input = LoanInput::new(price, down, 0.0, 30, 0.0, ProgramType::from_code(&program))
                .with_va_first_time_use(va_use.is_first());
            let fee = runner.calculator().program_fee(&input);
            print!("{}", render_program_fee(fee));
        }
        Commands::Batch { input, output } => {
            let loans = load_loans(&input)
                .with_context(|| format!("Failed to load loans from {}", input.display()))?;
            let results = runner.run_batch(&loans);

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("Unable to create {}", path.display()))?;
                    runner.write_csv(&loans, &results, BufWriter::new(file))?;
                    eprintln!("Priced {} loans, results written to: {}", loans.len(), path.display());
                }
                None => {
                    let stdout = io::stdout();
                    runner.write_csv(&loans, &results, stdout.lock())?;
                }
            }
        }
        Commands::Rates { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(runner.rates())?);
            } else {
                let mut out = io::stdout().lock();
                writeln!(out, "name,value")?;
                for (name, value) in runner.rates().entries() {
                    writeln!(out, "{},{}", name, value)?;
                }
            }
        }
    }

    Ok(())
}
