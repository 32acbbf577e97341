// Algoscope: step-through playback of classical algorithms

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use algoscope::constants::DEFAULT_SPEED_MS;
use algoscope::gate::{self, RawInput};
use algoscope::tracers::{generate_trace, Family};
use algoscope::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} <algorithm> [key=value ...] [--json] [--speed <ms>]", program_name);
    eprintln!();
    eprintln!("Algorithms:");
    for family in Family::ALL {
        eprintln!("  {}", family);
    }
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} bubble-sort array=5,1,4,2,8", program_name);
    eprintln!("  {} binary-search array=1,3,5,7,9 target=7", program_name);
    eprintln!(
        "  {} dijkstra nodes=5 edges=0-1:4,0-2:1,2-1:2,1-3:1,2-3:5,3-4:3 target=4",
        program_name
    );
    eprintln!("  {} coin-change coins=1,3,4 amount=6", program_name);
    eprintln!("  {} lcs a=AGGTAB b=GXTXAYB", program_name);
    eprintln!("  {} activity-selection activities=1-4,3-5,0-6,5-7", program_name);
    eprintln!("  {} fractional-knapsack items=10:60,20:100,30:120 capacity=50", program_name);
    eprintln!("  {} job-scheduling jobs=2:100,1:19,2:27,1:25,3:15", program_name);
    eprintln!("  {} inorder-traversal tree=1,2,3,4,5,null,6", program_name);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr and is off unless RUST_LOG asks for it
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(io::stderr)
            .init();
    }

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("algoscope");

    if args.len() < 2 {
        eprintln!("Error: No algorithm given");
        eprintln!();
        print_usage(program_name);
        std::process::exit(1);
    }

    let family: Family = match args[1].parse() {
        Ok(family) => family,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    // Split flags from key=value fields
    let mut json = false;
    let mut speed_ms = DEFAULT_SPEED_MS;
    let mut fields = Vec::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--speed" => {
                let Some(ms) = rest.next().and_then(|s| s.parse().ok()) else {
                    eprintln!("Error: --speed needs a number of milliseconds");
                    std::process::exit(1);
                };
                speed_ms = ms;
            }
            _ => fields.push(arg.as_str()),
        }
    }

    let params = match RawInput::from_args(fields).and_then(|input| gate::parse(family, &input)) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let trace = match generate_trace(family, &params) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(%family, snapshots = trace.len(), "trace ready");

    if json {
        println!("{}", trace.to_json()?);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(trace, speed_ms);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
