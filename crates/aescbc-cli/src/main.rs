//! Command-line interface for `aescbc`.

#![forbid(unsafe_code)]

mod telemetry;

use std::fs;
use std::path::{Path, PathBuf};

use aescbc::{BackendKind, CipherContext, PaddingMode, Registry, BLOCK_SIZE};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;

/// AES-CBC with PKCS#7 padding.
#[derive(Parser)]
#[command(name = "aescbc", version, about = "AES-CBC with PKCS#7 padding")]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, env = "AESCBC_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt data.
    Enc {
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        input: InputArgs,
        /// Write raw ciphertext here instead of printing hex.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Decrypt data.
    Dec {
        #[command(flatten)]
        cipher: CipherArgs,
        #[command(flatten)]
        input: InputArgs,
        /// Trust the padding length byte without checking the padding bytes.
        #[arg(long, default_value_t = false)]
        permissive: bool,
        /// Write raw plaintext here instead of printing hex.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Check that every available engine produces the same ciphertext.
    Check {
        /// Key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// IV as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Number of random plaintexts to test.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt random data with one engine and decrypt it with the other.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct CipherArgs {
    /// Key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// IV as 32 hex characters.
    #[arg(long, value_name = "HEX")]
    iv_hex: String,
    /// Engine to use (`modern` or `legacy`).
    #[arg(long, env = "AESCBC_BACKEND", default_value_t = BackendKind::Modern)]
    backend: BackendKind,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Input given inline as hex.
    #[arg(long, value_name = "HEX")]
    input_hex: Option<String>,
    /// Input read from a file.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;
    match cli.command {
        Commands::Enc {
            cipher,
            input,
            output,
        } => cmd_enc(&cipher, &input, output.as_deref()),
        Commands::Dec {
            cipher,
            input,
            permissive,
            output,
        } => cmd_dec(&cipher, &input, permissive, output.as_deref()),
        Commands::Check {
            key_hex,
            iv_hex,
            samples,
            seed,
        } => cmd_check(&key_hex, &iv_hex, samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_enc(cipher: &CipherArgs, input: &InputArgs, output: Option<&Path>) -> Result<()> {
    let ctx = build_context(cipher, PaddingMode::Strict)?;
    let data = read_input(input)?;
    let ciphertext = ctx.encrypt(&data).context("encrypt")?;
    info!(backend = %ctx.backend(), len = ciphertext.len(), "encrypted");
    write_output(output, &ciphertext)
}

fn cmd_dec(
    cipher: &CipherArgs,
    input: &InputArgs,
    permissive: bool,
    output: Option<&Path>,
) -> Result<()> {
    let mode = if permissive {
        PaddingMode::Permissive
    } else {
        PaddingMode::Strict
    };
    let ctx = build_context(cipher, mode)?;
    let data = read_input(input)?;
    let plaintext = ctx.decrypt(&data).context("decrypt")?;
    info!(backend = %ctx.backend(), len = plaintext.len(), "decrypted");
    write_output(output, &plaintext)
}

fn cmd_check(key_hex: &str, iv_hex: &str, samples: usize, seed: Option<u64>) -> Result<()> {
    let key = parse_hex(key_hex, "key")?;
    let iv = parse_hex(iv_hex, "iv")?;
    let mut rng = seeded_rng(seed);
    let checked = check_engines(&key, &iv, samples, &mut rng)?;
    println!("{checked} engines agree on {samples} samples");
    Ok(())
}

/// Encrypts random plaintexts on every available engine and cross-decrypts.
/// Returns the number of engines compared.
fn check_engines(key: &[u8], iv: &[u8], samples: usize, rng: &mut impl RngCore) -> Result<usize> {
    let contexts = Registry::detect()
        .kinds()
        .map(|kind| {
            CipherContext::builder()
                .key(key)
                .iv(iv)
                .backend(kind)
                .build()
                .with_context(|| format!("configure {kind} engine"))
        })
        .collect::<Result<Vec<_>>>()?;
    if contexts.is_empty() {
        bail!("no cipher engines are available in this build");
    }

    for _ in 0..samples {
        let len = rng.gen_range(0..4 * BLOCK_SIZE);
        let mut plaintext = vec![0u8; len];
        rng.fill_bytes(&mut plaintext);

        let expected = contexts[0].encrypt(&plaintext).context("encrypt")?;
        for ctx in &contexts {
            let ciphertext = ctx.encrypt(&plaintext).context("encrypt")?;
            if ciphertext != expected {
                bail!(
                    "{} and {} engines disagree on a {len}-byte plaintext",
                    contexts[0].backend(),
                    ctx.backend()
                );
            }
            if ctx.decrypt(&expected).context("decrypt")? != plaintext {
                bail!("{} engine failed to decrypt", ctx.backend());
            }
        }
    }
    Ok(contexts.len())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 32];
    let mut iv = [0u8; BLOCK_SIZE];
    let mut plaintext = [0u8; 40];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut plaintext);

    let mut ctx = CipherContext::builder()
        .key(&key)
        .iv(&iv)
        .backend(BackendKind::Modern)
        .build()
        .context("configure modern engine")?;
    let ciphertext = ctx.encrypt(&plaintext).context("encrypt")?;

    ctx.select_backend(BackendKind::Legacy)
        .context("select legacy engine")?;
    let decrypted = ctx.decrypt(&ciphertext).context("decrypt")?;

    println!("demo key: {}", hex::encode(key));
    println!("iv: {}", hex::encode(iv));
    println!("plaintext: {}", hex::encode(plaintext));
    println!("ciphertext (modern): {}", hex::encode(&ciphertext));
    println!("decrypted (legacy): {}", hex::encode(&decrypted));
    if decrypted != plaintext {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_context(args: &CipherArgs, mode: PaddingMode) -> Result<CipherContext> {
    let key = parse_hex(&args.key_hex, "key")?;
    let iv = parse_hex(&args.iv_hex, "iv")?;
    CipherContext::builder()
        .key(&key)
        .iv(&iv)
        .backend(args.backend)
        .padding_mode(mode)
        .build()
        .context("configure cipher")
}

fn parse_hex(hex_str: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))
}

fn read_input(input: &InputArgs) -> Result<Vec<u8>> {
    match (&input.input_hex, &input.input) {
        (Some(hex_str), _) => parse_hex(hex_str, "input"),
        (None, Some(path)) => fs::read(path).with_context(|| format!("read {}", path.display())),
        (None, None) => bail!("either --input-hex or --input is required"),
    }
}

fn write_output(output: Option<&Path>, data: &[u8]) -> Result<()> {
    match output {
        Some(path) => fs::write(path, data).with_context(|| format!("write {}", path.display())),
        None => {
            println!("{}", hex::encode(data));
            Ok(())
        }
    }
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => ChaCha20Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_backend_argument() {
        let cli = Cli::try_parse_from([
            "aescbc",
            "enc",
            "--key-hex",
            "00112233445566778899aabbccddeeff",
            "--iv-hex",
            "00000000000000000000000000000000",
            "--backend",
            "mcrypt",
            "--input-hex",
            "414243",
        ])
        .unwrap();
        match cli.command {
            Commands::Enc { cipher, .. } => assert_eq!(cipher.backend, BackendKind::Legacy),
            _ => panic!("expected enc"),
        }
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = Cli::try_parse_from([
            "aescbc",
            "enc",
            "--key-hex",
            "00112233445566778899aabbccddeeff",
            "--iv-hex",
            "00000000000000000000000000000000",
            "--backend",
            "sodium",
            "--input-hex",
            "41",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn input_source_is_required() {
        let result = Cli::try_parse_from([
            "aescbc",
            "dec",
            "--key-hex",
            "00112233445566778899aabbccddeeff",
            "--iv-hex",
            "00000000000000000000000000000000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn build_context_reports_bad_key() {
        let args = CipherArgs {
            key_hex: "0011".into(),
            iv_hex: "00000000000000000000000000000000".into(),
            backend: BackendKind::Modern,
        };
        let err = build_context(&args, PaddingMode::Strict).unwrap_err();
        assert!(format!("{err:#}").contains("key length must be 16, 24, or 32 bytes"));
    }

    #[test]
    fn engines_agree() {
        let mut rng = ChaCha20Rng::from_seed([4u8; 32]);
        let engines = check_engines(&[1u8; 16], &[2u8; BLOCK_SIZE], 8, &mut rng).unwrap();
        assert_eq!(engines, 2);
    }

    #[test]
    fn demo_round_trips() {
        cmd_demo(Some(7)).unwrap();
    }
}
