// Facility Keycard - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/facility-keycard demo
// ```
//
// Or issue a single card:
//
// ```console
// $ ./target/release/facility-keycard issue --kind member -f John -l Doe --access "Main Entrance"
// ```

use anyhow::{Context, Result};
use clap::Parser;
use facility_keycard::keycard::today;
use facility_keycard::types::{Command, IssueArgs};
use facility_keycard::{
    AccessDesk, CardStatus, CliArgs, EmployeeDetails, FacilityConfig, HolderKind, LoggingConfig,
    NewMember, OutputFormat, WorkStatus,
};
use std::process;
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match FacilityConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    if let Err(e) = LoggingConfig::from_cli_args(&args).init() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Facility Keycard");

    let config = match FacilityConfig::from_cli_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no cards will be issued.");
        print_configuration_summary(&config);
        return;
    }

    if let Err(e) = run(config, args.command) {
        error!("Run failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Facility Keycard completed successfully");
}

fn run(config: FacilityConfig, command: Option<Command>) -> Result<()> {
    let format = config.get_output_format()?;
    let mut desk = AccessDesk::new(config);

    let statuses = match command {
        Some(Command::Issue(issue)) => run_issue(&mut desk, &issue)?,
        Some(Command::Demo) | None => run_demo(&mut desk)?,
    };

    print_statuses(&statuses, format)
}

/// Register the holder described on the command line and issue their card
fn run_issue(desk: &mut AccessDesk, args: &IssueArgs) -> Result<Vec<CardStatus>> {
    let card_number = match args.kind {
        HolderKind::Member => {
            let mut application = NewMember::new(&args.first_name, &args.last_name);
            if let Some(email) = &args.email {
                application = application.with_email(email);
            }
            if let Some(phone) = &args.phone {
                application = application.with_phone(phone);
            }
            if let Some(membership_type) = args.membership_type {
                application = application.with_type(membership_type);
            }
            let member_id = desk.register_member(application).context("Failed to register member")?;
            desk.issue_member_card(member_id, args.card_number.clone(), args.expires)
                .context("Failed to issue member card")?
                .card_number()
                .to_string()
        }
        HolderKind::Employee => {
            let details = EmployeeDetails {
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
                email: args.email.clone(),
                phone_number: args.phone.clone(),
                department: args.department.clone().unwrap_or_else(|| "General".to_string()),
                position: args.position.clone().unwrap_or_else(|| "Staff".to_string()),
                salary: 0.0,
                hire_date: today(),
                work_status: WorkStatus::Active,
            };
            let employee_id = desk.hire_employee(details).context("Failed to register employee")?;
            desk.issue_employee_card(employee_id, args.card_number.clone(), args.expires)
                .context("Failed to issue employee card")?
                .card_number()
                .to_string()
        }
    };

    eprintln!("Issued keycard {}", card_number);
    for location in &args.accesses {
        let decision = desk.check_access(&card_number, location)?;
        eprintln!(
            "  {} at {}: {}",
            card_number,
            location,
            if decision.granted { "granted" } else { "denied" }
        );
    }

    Ok(vec![desk.card_status(&card_number)?])
}

/// Run the scripted lifecycle walk and report each door check
fn run_demo(desk: &mut AccessDesk) -> Result<Vec<CardStatus>> {
    let report = desk.run_demo().context("Demo walk failed")?;
    for decision in &report.decisions {
        match decision.denial {
            None => eprintln!("  {} at {}: granted", decision.card_number, decision.location),
            Some(reason) => eprintln!(
                "  {} at {}: denied ({})",
                decision.card_number, decision.location, reason
            ),
        }
    }
    Ok(report.statuses)
}

fn print_statuses(statuses: &[CardStatus], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(statuses).context("Failed to serialize card status")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for status in statuses {
                println!("{}", render_text(status));
            }
        }
    }
    Ok(())
}

fn render_text(status: &CardStatus) -> String {
    let mut lines = vec![
        format!("Card {} ({})", status.card_number, status.card_type),
        format!("  Holder:     {}", status.holder_name),
    ];
    if let Some(email) = &status.holder_email {
        lines.push(format!("  Email:      {}", email));
    }
    if let Some(phone) = &status.holder_phone {
        lines.push(format!("  Phone:      {}", phone));
    }
    lines.push(format!("  Issued:     {}", status.issue_date));
    lines.push(format!("  Expires:    {}", status.expiration_date));
    lines.push(format!(
        "  Status:     {}",
        match status.denial {
            None => "valid".to_string(),
            Some(reason) => format!("not valid ({})", reason),
        }
    ));
    if let (Some(time), Some(location)) = (&status.last_access_time, &status.last_access_location) {
        lines.push(format!("  Last access: {} at {}", time.format("%Y-%m-%d %H:%M:%S UTC"), location));
    }
    lines.join("\n")
}

fn print_configuration_summary(config: &FacilityConfig) {
    eprintln!("Configuration:");
    eprintln!("  Member card prefix: {}", config.member_card_prefix);
    eprintln!("  Employee card prefix: {}", config.employee_card_prefix);
    eprintln!("  Card number digits: {}", config.card_number_digits);
    eprintln!("  Employee card validity: {} years", config.employee_card_validity_years);
    eprintln!("  Output format: {}", config.output_format);
    match config.seed {
        Some(seed) => eprintln!("  Seed: {}", seed),
        None => eprintln!("  Seed: random"),
    }
}
