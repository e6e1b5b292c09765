//! ICAP CLI
//!
//! Command-line interface for converting addresses to and from `XE` IBANs.

use clap::{Parser, Subcommand};
use icap_core::config::{CodecConfig, LogFormat};
use icap_core::CoreError;
use icap_crypto::checksum::{check_address_checksum, to_checksum_address};
use icap_iban::{
    client, create_indirect, has_valid_checksum, institution, is_direct, is_indirect,
    is_well_formed, IbanCodec, IbanError,
};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "icap")]
#[command(version)]
#[command(about = "Convert blockchain addresses to and from XE IBANs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ICAP_CONFIG")]
    config: Option<PathBuf>,

    /// Named preset used when no configuration file is given: icap, legacy or wide
    #[arg(short, long, global = true, default_value = "icap")]
    preset: String,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a hex address as an IBAN
    ToIban {
        /// Address (hex, `0x` prefix optional)
        address: String,
    },

    /// Decode a direct IBAN into a checksum-cased address
    ToAddress {
        /// IBAN
        iban: String,

        /// Reject IBANs whose check digits do not verify
        #[arg(long)]
        strict: bool,
    },

    /// Render an address with checksum casing
    Checksum {
        /// Address (hex, any case)
        address: String,
    },

    /// Verify the checksum casing of an address
    Verify {
        /// Checksum-cased address
        address: String,
    },

    /// Show the structure of an IBAN
    Inspect {
        /// IBAN
        iban: String,
    },

    /// Build an indirect IBAN from an institution and client identifier
    Indirect {
        /// Institution code (4 characters)
        #[arg(long)]
        institution: String,

        /// Client identifier (9 characters)
        #[arg(long)]
        identifier: String,
    },
}

/// Result of one command, printed as text or JSON
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
enum Report {
    ToIban {
        address: String,
        iban: String,
        direct: bool,
    },
    ToAddress {
        iban: String,
        address: String,
        checksum_valid: bool,
    },
    Checksum {
        input: String,
        address: String,
    },
    Verify {
        address: String,
        valid: bool,
    },
    Inspect(Inspection),
    Indirect {
        institution: String,
        identifier: String,
        iban: String,
    },
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct Inspection {
    iban: String,
    length: usize,
    class: &'static str,
    well_formed: bool,
    checksum_valid: bool,
    check_digits: Option<String>,
    bban: Option<String>,
    institution: Option<String>,
    client: Option<String>,
    address: Option<String>,
}

impl Report {
    /// Whether the command should exit successfully
    fn is_success(&self) -> bool {
        !matches!(self, Report::Verify { valid: false, .. })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::ToIban { iban, .. } => write!(f, "{}", iban),
            Report::ToAddress { address, .. } => write!(f, "{}", address),
            Report::Checksum { address, .. } => write!(f, "{}", address),
            Report::Verify { address, valid } => {
                let verdict = if *valid { "valid" } else { "invalid" };
                write!(f, "{}: {}", address, verdict)
            }
            Report::Inspect(inspection) => {
                let na = "-".to_string();
                writeln!(f, "IBAN:           {}", inspection.iban)?;
                writeln!(f, "Length:         {}", inspection.length)?;
                writeln!(f, "Class:          {}", inspection.class)?;
                writeln!(f, "Well formed:    {}", inspection.well_formed)?;
                writeln!(f, "Checksum valid: {}", inspection.checksum_valid)?;
                writeln!(
                    f,
                    "Check digits:   {}",
                    inspection.check_digits.as_ref().unwrap_or(&na)
                )?;
                writeln!(f, "BBAN:           {}", inspection.bban.as_ref().unwrap_or(&na))?;
                writeln!(
                    f,
                    "Institution:    {}",
                    inspection.institution.as_ref().unwrap_or(&na)
                )?;
                writeln!(f, "Client:         {}", inspection.client.as_ref().unwrap_or(&na))?;
                write!(f, "Address:        {}", inspection.address.as_ref().unwrap_or(&na))
            }
            Report::Indirect { iban, .. } => write!(f, "{}", iban),
        }
    }
}

fn init_logging(config: &CodecConfig, verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    // Logs go to stderr so stdout stays machine-readable
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CodecConfig> {
    let config = match &cli.config {
        Some(path) => CodecConfig::load(path)?,
        None => CodecConfig::for_preset(&cli.preset)?,
    };
    config.validate()?;
    Ok(config)
}

fn run(command: &Commands, codec: &IbanCodec) -> anyhow::Result<Report> {
    let report = match command {
        Commands::ToIban { address } => {
            let iban = codec.address_to_iban(address)?;
            Report::ToIban {
                address: address.clone(),
                direct: iban.is_direct(),
                iban: iban.into_string(),
            }
        }

        Commands::ToAddress { iban, strict } => {
            let checksum_valid = has_valid_checksum(iban);
            if !checksum_valid {
                if *strict {
                    anyhow::bail!("IBAN check digits do not verify: {}", iban);
                }
                tracing::warn!(iban = %iban, "IBAN check digits do not verify");
            }
            let address = codec.iban_to_address(iban)?;
            Report::ToAddress {
                iban: iban.clone(),
                address: address.to_string(),
                checksum_valid,
            }
        }

        Commands::Checksum { address } => {
            let checksummed = to_checksum_address(address, codec.profile())?;
            Report::Checksum {
                input: address.clone(),
                address: checksummed.to_string(),
            }
        }

        Commands::Verify { address } => {
            let valid = check_address_checksum(address, codec.profile());
            if !valid {
                tracing::warn!(address = %address, "checksum casing does not verify");
            }
            Report::Verify {
                address: address.clone(),
                valid,
            }
        }

        Commands::Inspect { iban } => Report::Inspect(inspect(iban, codec)),

        Commands::Indirect {
            institution,
            identifier,
        } => {
            let iban = create_indirect(institution, identifier)?;
            Report::Indirect {
                institution: institution.clone(),
                identifier: identifier.clone(),
                iban: iban.into_string(),
            }
        }
    };

    Ok(report)
}

fn inspect(iban: &str, codec: &IbanCodec) -> Inspection {
    let class = if is_direct(iban) {
        "direct"
    } else if is_indirect(iban) {
        "indirect"
    } else {
        "unknown"
    };

    let address = codec.iban_to_address(iban).ok().map(|a| a.to_string());

    Inspection {
        iban: iban.to_string(),
        length: iban.len(),
        class,
        well_formed: is_well_formed(iban),
        checksum_valid: has_valid_checksum(iban),
        check_digits: iban.get(2..4).map(str::to_string),
        bban: iban.get(4..).filter(|b| !b.is_empty()).map(str::to_string),
        institution: institution(iban).map(str::to_string),
        client: client(iban).map(str::to_string),
        address,
    }
}

/// Exit status for a failed command: the library error code when known
fn exit_code(err: &anyhow::Error) -> u8 {
    let code = if let Some(e) = err.downcast_ref::<IbanError>() {
        e.code()
    } else if let Some(e) = err.downcast_ref::<CoreError>() {
        e.code()
    } else {
        1
    };
    u8::try_from(code).unwrap_or(1)
}

fn print_report(report: &Report, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(exit_code(&e));
        }
    };
    init_logging(&config, cli.verbose);
    tracing::debug!(
        byte_len = config.address.byte_len,
        hash = %config.address.hash,
        bban_pad_len = config.iban.bban_pad_len,
        "codec configured"
    );

    let result = IbanCodec::from_config(&config)
        .map_err(anyhow::Error::from)
        .and_then(|codec| run(&cli.command, &codec))
        .and_then(|report| print_report(&report, cli.json).map(|_| report));

    match result {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}
