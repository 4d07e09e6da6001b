use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use k256::elliptic_curve::zeroize::Zeroizing;
use std::io::Read;
use tracing::{debug, info, Level};
use txcraft_core::canonical::encode_hex;
use txcraft_core::crypto::{self, parse_private_key, parse_public_key};
use txcraft_core::{NetworkConfig, Transaction};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Network preset used for address derivation (conflux, ethereum)
    #[arg(short, long, global = true, default_value = "conflux")]
    network: String,

    /// Log at DEBUG level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the RLP encoding of a JSON transaction
    Encode {
        /// JSON file with the transaction fields, or `-` for stdin
        #[arg(long, default_value = "-")]
        tx: String,

        /// Encode the signed shape `[[fields], v, r, s]`
        #[arg(long)]
        signed: bool,
    },
    /// Print the signing hash and, when signed, the transaction hash
    Hash {
        #[arg(long, default_value = "-")]
        tx: String,
    },
    /// Sign a JSON transaction and print the signed record and raw payload
    Sign {
        #[arg(long, default_value = "-")]
        tx: String,

        /// Private key (hex)
        #[arg(long, env = "TXCRAFT_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
    /// Decode a raw transaction and recover its signer
    Recover {
        /// Raw transaction hex, as produced by `sign`
        #[arg(long)]
        raw: String,
    },
    /// Derive an address from a public key (hex, 64 or 65 bytes)
    Address {
        #[arg(long)]
        public_key: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let network = NetworkConfig::by_name(&args.network)
        .ok_or_else(|| anyhow!("Unknown network: {}", args.network))?;
    debug!("Using {} address scheme {:?}", network.name, network.address_scheme);

    match args.command {
        Command::Encode { tx, signed } => {
            let tx = load_transaction(&tx)?;
            let encoded = tx.encode(signed).context("Failed to encode transaction")?;
            println!("{}", encode_hex(encoded));
        }
        Command::Hash { tx } => {
            let tx = load_transaction(&tx)?;
            let signing_hash = tx.signing_hash().context("Failed to encode transaction")?;
            println!("signingHash: {signing_hash}");
            println!("hash: {}", describe_hash(&tx));
        }
        Command::Sign { tx, private_key } => {
            let mut tx = load_transaction(&tx)?;
            let private_key = Zeroizing::new(private_key);
            let key = parse_private_key(&private_key).context("Invalid private key")?;
            drop(private_key);

            let raw = tx.sign(&key[..])?.serialize()?;
            drop(key);

            info!("Signed transaction {:?}", tx.hash());
            let output = serde_json::json!({
                "transaction": tx,
                "hash": tx.hash(),
                "from": tx.sender_on(&network),
                "raw": raw,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Recover { raw } => {
            let tx = Transaction::from_raw_hex(&raw).context("Failed to decode raw transaction")?;
            let public_key = tx.recover().context("Failed to recover signer")?;
            let output = serde_json::json!({
                "transaction": tx,
                "hash": tx.hash(),
                "publicKey": public_key,
                "from": crypto::public_key_to_address(&public_key, network.address_scheme),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Address { public_key } => {
            let public_key = parse_public_key(&public_key)?;
            println!("{}", crypto::public_key_to_address(&public_key, network.address_scheme));
        }
    }

    Ok(())
}

fn describe_hash(tx: &Transaction) -> String {
    match tx.hash() {
        Some(hash) => hash.to_string(),
        None if tx.v.is_none() && tx.r.is_none() && tx.s.is_none() => {
            "unavailable (transaction is not signed)".to_string()
        }
        None => "unavailable (signature is incomplete or malformed)".to_string(),
    }
}

fn load_transaction(source: &str) -> Result<Transaction> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read transaction from stdin")?;
        buf
    } else {
        std::fs::read_to_string(source)
            .with_context(|| format!("Failed to read transaction file {source}"))?
    };
    serde_json::from_str(&json).context("Invalid transaction JSON")
}
