mod age;
mod calculator;
mod form;
mod logging;
mod svg;
mod validation;

use anyhow::{Context, Result};
use calculator::{AgeCalculator, FixedClock, SystemClock};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use form::{Form, FormState};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use validation::DateInput;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Compute an age in years, months and days from a birth date.
///
/// With --day/--month/--year the date is submitted once; otherwise the fields
/// are read interactively from stdin until end of input.
#[derive(Parser, Debug)]
#[command(name = "agecalc")]
#[command(version)]
pub struct Args {
    /// Day of birth (1-31)
    #[arg(short, long)]
    pub day: Option<String>,

    /// Month of birth (1-12)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Year of birth (1000 to the current year)
    #[arg(short, long)]
    pub year: Option<String>,

    /// Pin "now" instead of reading the local clock (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)
    #[arg(long, env = "AGECALC_NOW", value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,

    /// Output format
    #[arg(long, env = "AGECALC_FORMAT", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the outcome as an SVG card to this path
    #[arg(long, env = "AGECALC_SVG")]
    pub svg: Option<PathBuf>,

    /// Color theme for the SVG card
    #[arg(long, env = "AGECALC_THEME", value_enum, default_value = "dark")]
    pub theme: svg::Theme,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    fn is_one_shot(&self) -> bool {
        self.day.is_some() || self.month.is_some() || self.year.is_some()
    }
}

fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
        .map_err(|e| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS: {e}"))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let calculator = match args.now {
        Some(now) => AgeCalculator::new(FixedClock(now)),
        None => AgeCalculator::new(SystemClock),
    };
    info!(now = %calculator.now(), one_shot = args.is_one_shot(), "starting");

    if args.is_one_shot() {
        run_once(&args, &calculator)
    } else {
        run_interactive(&args, &calculator)?;
        Ok(ExitCode::SUCCESS)
    }
}

fn run_once(args: &Args, calculator: &AgeCalculator) -> Result<ExitCode> {
    let mut form = Form::with_input(DateInput::new(
        args.day.clone().unwrap_or_default(),
        args.month.clone().unwrap_or_default(),
        args.year.clone().unwrap_or_default(),
    ));

    let state = form.submit(calculator);
    write_card(args, state)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
        OutputFormat::Text => match state.error() {
            Some(err) => eprintln!("{err}"),
            None => print!("{}", render_text(state)),
        },
    }

    Ok(if state.age().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_interactive(args: &Args, calculator: &AgeCalculator) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut form = Form::new();
    write_card(args, form.state())?;

    loop {
        let Some(day) = prompt("DAY", &mut lines)? else {
            break;
        };
        form.set_day(day);
        let Some(month) = prompt("MONTH", &mut lines)? else {
            break;
        };
        form.set_month(month);
        let Some(year) = prompt("YEAR", &mut lines)? else {
            break;
        };
        form.set_year(year);

        let state = form.submit(calculator);
        write_card(args, state)?;
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
            OutputFormat::Text => println!("{}", render_text(state)),
        }
    }

    Ok(())
}

/// Prints `label` and reads one line, or `None` at end of input.
fn prompt(
    label: &str,
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush().context("Failed to flush stdout")?;
    lines
        .next()
        .transpose()
        .context("Failed to read from stdin")
}

fn write_card(args: &Args, state: &FormState) -> Result<()> {
    if let Some(path) = &args.svg {
        write_svg(path, state, args.theme)?;
    }
    Ok(())
}

fn write_svg(path: &Path, state: &FormState, theme: svg::Theme) -> Result<()> {
    fs::write(path, svg::generate_svg(state, theme))
        .with_context(|| format!("Failed to write SVG card to {}", path.display()))?;
    info!(path = %path.display(), "wrote SVG card");
    Ok(())
}

/// Text rendering of the output surface: three labeled numbers or the error.
fn render_text(state: &FormState) -> String {
    match state {
        FormState::Idle => String::new(),
        FormState::Settled(Ok(age)) => format!(
            "Years:  {}\nMonths: {}\nDays:   {}\n",
            age.years, age.months, age.days
        ),
        FormState::Settled(Err(err)) => format!("{err}\n"),
    }
}
