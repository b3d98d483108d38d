use clap::{Parser, Subcommand, ValueEnum};
use flakypay::application::{BatchOrchestrator, PaymentGateway};
use flakypay::config::GatewayConfig;
use flakypay::domain::ports::EntropyBox;
use flakypay::infrastructure::{SeededEntropy, ThreadEntropy, TokioDelay};
use flakypay::interfaces::csv::PaymentRequestReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with latency windows, failure rates and fee table.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed the random source for reproducible runs.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Check a card number against the Luhn checksum.
    ValidateCard { number: String },
    /// Compute the processing fee for an amount.
    Fee {
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        currency: String,
    },
    /// Submit a single payment.
    Pay {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Poll the status of a payment.
    Status { id: String },
    /// Refund a payment.
    Refund {
        id: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Process an `id,amount` CSV file as one batch.
    Batch {
        input: PathBuf,
        /// Run up to N payments at once (results keep input order).
        #[arg(long)]
        concurrency: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GatewayConfig::from_path(path).into_diagnostic()?,
        None => GatewayConfig::default(),
    };
    let entropy: EntropyBox = match cli.seed {
        Some(seed) => Box::new(SeededEntropy::new(seed)),
        None => Box::new(ThreadEntropy),
    };
    let gateway = PaymentGateway::new(config, entropy, Box::new(TokioDelay));

    match cli.command {
        Command::ValidateCard { number } => {
            emit(cli.format, &gateway.validate_card(&number))?;
        }
        Command::Fee { amount, currency } => {
            let fee = gateway.calculate_fee(amount, &currency).into_diagnostic()?;
            emit(cli.format, &fee)?;
        }
        Command::Pay { id, amount } => {
            let receipt = gateway.process_payment(&id, amount).await.into_diagnostic()?;
            emit(cli.format, &receipt)?;
        }
        Command::Status { id } => {
            let status = gateway.get_payment_status(&id).await.into_diagnostic()?;
            emit(cli.format, &status)?;
        }
        Command::Refund { id, amount } => {
            let receipt = gateway.refund_payment(&id, amount).await.into_diagnostic()?;
            emit(cli.format, &receipt)?;
        }
        Command::Batch { input, concurrency } => {
            let file = File::open(input).into_diagnostic()?;
            let requests = PaymentRequestReader::new(file).read_all().into_diagnostic()?;

            let orchestrator = BatchOrchestrator::new(&gateway);
            let receipts = match concurrency {
                Some(limit) => orchestrator.process_batch_bounded(&requests, limit).await,
                None => orchestrator.process_batch(&requests).await,
            }
            .into_diagnostic()?;

            match cli.format {
                Format::Text => {
                    for receipt in &receipts {
                        println!("{receipt}");
                    }
                }
                Format::Json => {
                    println!("{}", serde_json::to_string(&receipts).into_diagnostic()?)
                }
            }
        }
    }

    Ok(())
}

fn emit<T: Serialize + std::fmt::Display + ?Sized>(format: Format, value: &T) -> Result<()> {
    match format {
        Format::Text => println!("{value}"),
        Format::Json => println!("{}", serde_json::to_string(value).into_diagnostic()?),
    }
    Ok(())
}
