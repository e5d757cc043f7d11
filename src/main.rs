use anyhow::{bail, Result};
use std::env;

use eco_buddy::{
    parse_quantity, random_tip, CalcSession, EmissionCatalog, FootprintError, FootprintLedger,
    DATA_FILE,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => run_ui_mode(&args),
        Some("log") => run_log(&args[1..]),
        Some("history") => run_history(&args[1..]),
        Some("activities") => run_activities(&args[1..]),
        Some("help" | "--help" | "-h") => {
            print_usage();
            Ok(())
        }
        // Bare flags (e.g. --data) still mean UI mode
        Some(flag) if flag.starts_with("--") => run_ui_mode(&args),
        Some(other) => {
            eprintln!("❌ Unknown mode: {}", other);
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Flags shared by every mode; positional arguments land in `rest`
struct CommonOpts {
    date: Option<String>,
    data_file: Option<String>,
    catalog_file: Option<String>,
    rest: Vec<String>,
}

fn parse_opts(args: &[String]) -> Result<CommonOpts> {
    let mut opts = CommonOpts {
        date: None,
        data_file: None,
        catalog_file: None,
        rest: Vec::new(),
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--date" => opts.date = Some(next_value(&mut iter, "--date")?),
            "--data" => opts.data_file = Some(next_value(&mut iter, "--data")?),
            "--catalog" => opts.catalog_file = Some(next_value(&mut iter, "--catalog")?),
            _ => opts.rest.push(arg.clone()),
        }
    }

    Ok(opts)
}

fn next_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String> {
    match iter.next() {
        Some(value) => Ok(value.clone()),
        None => bail!("{} requires a value", flag),
    }
}

/// Log file path: --data flag, then ECO_BUDDY_DATA, then the default
fn resolve_data_file(opts: &CommonOpts) -> String {
    opts.data_file
        .clone()
        .or_else(|| env::var("ECO_BUDDY_DATA").ok())
        .unwrap_or_else(|| DATA_FILE.to_string())
}

/// Emission catalog: --catalog flag, then ECO_BUDDY_CATALOG, then built-in
fn load_catalog(opts: &CommonOpts) -> Result<EmissionCatalog> {
    let path = opts
        .catalog_file
        .clone()
        .or_else(|| env::var("ECO_BUDDY_CATALOG").ok());

    match path {
        Some(path) => EmissionCatalog::from_file(&path),
        None => Ok(EmissionCatalog::with_defaults()),
    }
}

// ============================================================================
// MODES
// ============================================================================

fn run_log(args: &[String]) -> Result<()> {
    let opts = parse_opts(args)?;
    let catalog = load_catalog(&opts)?;
    let ledger = FootprintLedger::new(resolve_data_file(&opts));

    let mut session = match opts.date.clone() {
        Some(date) => CalcSession::with_date(date),
        None => CalcSession::new(),
    };

    if opts.rest.is_empty() {
        eprintln!("❌ {}", FootprintError::EmptyInput);
        eprintln!("   Usage: eco-buddy log \"Car Usage (km)=12.5\" \"Cooking (meal)=2\"");
        std::process::exit(1);
    }

    for pair in &opts.rest {
        let (activity, raw_quantity) = match pair.split_once('=') {
            Some(parts) => parts,
            None => {
                eprintln!("❌ Expected ACTIVITY=QUANTITY, got: {}", pair);
                std::process::exit(1);
            }
        };

        let quantity = match parse_quantity(raw_quantity) {
            Ok(quantity) => quantity,
            Err(err) => {
                eprintln!("❌ {}", err);
                std::process::exit(1);
            }
        };

        session.add_entry(activity.trim(), quantity);
    }

    // Compute first so nothing is written when an activity is unknown
    let summary = match ledger.compute(&catalog, session.entries()) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("❌ {}", err);
            std::process::exit(1);
        }
    };

    println!("📊 Carbon footprint for {}", session.date());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (entry, contribution) in session.entries().iter().zip(&summary.contributions) {
        println!(
            "  {:<30} {:>8}  →  {:.2} kg CO₂",
            entry.activity, entry.quantity, contribution
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("🌍 {}", summary.headline());
    println!();

    ledger.append(session.date(), session.entries(), summary.grand_total)?;
    println!(
        "✓ Logged {} entries to {}",
        session.len(),
        ledger.data_file().display()
    );

    println!("\n💡 Tip: {}", random_tip());

    Ok(())
}

fn run_history(args: &[String]) -> Result<()> {
    let opts = parse_opts(args)?;
    let ledger = FootprintLedger::new(resolve_data_file(&opts));

    let records = match opts.date.as_deref() {
        Some(date) => ledger.records_for_date(date)?,
        None => ledger.read_all()?,
    };

    if records.is_empty() {
        println!("No logged activities yet ({}).", ledger.data_file().display());
        return Ok(());
    }

    println!("📊 Carbon Footprint Log - {}", ledger.data_file().display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for record in &records {
        println!(
            "  {}  {:<30} {:>10}  (day total {:.2} kg CO₂)",
            record.date, record.activity, record.quantity, record.total_footprint
        );
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {} rows", records.len());

    Ok(())
}

fn run_activities(args: &[String]) -> Result<()> {
    let opts = parse_opts(args)?;
    let catalog = load_catalog(&opts)?;

    let names: Vec<&str> = match opts.rest.first() {
        Some(term) => catalog.search(term).collect(),
        None => catalog.all_activities().collect(),
    };

    println!("🌱 Emission factors ({} activities)", names.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for name in &names {
        let factor = catalog.factor_of(name).unwrap_or(0.0);
        println!("  {:<34} {:>8.2} kg CO₂ per unit", name, factor);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(args: &[String]) -> Result<()> {
    use eco_buddy::ui;

    let opts = parse_opts(args)?;
    let catalog = load_catalog(&opts)?;
    let ledger = FootprintLedger::new(resolve_data_file(&opts));

    println!("🌍 Loading Eco Buddy...\n");
    println!("✓ {} activities in the emission catalog", catalog.len());
    println!("✓ Logging to {}\n", ledger.data_file().display());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(catalog, ledger);
    if let Some(date) = opts.date {
        app.session.set_date(date.clone());
        app.date_input = date;
    }
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_args: &[String]) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or log from the command line: eco-buddy log \"Car Usage (km)=12.5\"");
    std::process::exit(1);
}

fn print_usage() {
    println!("🌍 Eco Buddy - Daily Carbon Footprint Calculator");
    println!();
    println!("Usage:");
    println!("  eco-buddy                       Interactive UI (default)");
    println!("  eco-buddy log ACTIVITY=QTY ...  Compute, display and log one day");
    println!("  eco-buddy history               Show the logged footprint rows");
    println!("  eco-buddy activities [TERM]     List catalog activities, optionally filtered");
    println!("  eco-buddy help                  Show this help");
    println!();
    println!("Options:");
    println!("  --date DATE       Date for the logged rows (default: today, YYYY-MM-DD)");
    println!("  --data PATH       Log file (default: {} or $ECO_BUDDY_DATA)", DATA_FILE);
    println!("  --catalog PATH    Emission factors JSON (default: built-in, or $ECO_BUDDY_CATALOG)");
    println!();
    println!("Example:");
    println!("  eco-buddy log \"Car Usage (km)=12.5\" \"Cooking (meal)=2\"");
}
