mod args;

use aesmodes::{Cipher, Key, Mode, Padding};
use args::{Cli, Commands};
use clap::Parser;

use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("--aad is only valid with --mode gcm")]
    AadInvalidMode,

    #[error("invalid --aad hex: {0}")]
    AadInvalidHex(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Aes(#[from] aesmodes::Error),
}

fn main() -> ExitCode {
    match aes_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn aes_cli() -> Result<(), CliError> {
    let args = Cli::parse();

    match args.command {
        Commands::Encrypt(enc) => {
            let common = enc.common;
            let mode = Mode::from(common.mode);
            let padding: Padding = common.padding.parse()?;

            let plaintext = fs::read(&common.input)?;

            // read or generate key
            let key = if enc.gen_key {
                let key = Key::random(enc.key_size.into())?;
                fs::write(&common.key, key.as_bytes())?;
                key
            } else {
                Key::try_from_slice(&fs::read(&common.key)?)?
            };

            let aad = match enc.aad {
                Some(aad_str) => {
                    if mode != Mode::Gcm {
                        return Err(CliError::AadInvalidMode);
                    }
                    Some(parse_aad(&aad_str)?)
                }
                None => None,
            };

            let start = Instant::now();
            let cipher = Cipher::new(&key);
            let ciphertext = cipher.seal(mode, &plaintext, padding, aad.as_deref())?;
            let duration = start.elapsed();

            fs::write(&common.output, &ciphertext)?;
            println!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let mode = Mode::from(common.mode);
            let padding: Padding = common.padding.parse()?;

            let ciphertext = fs::read(&common.input)?;
            let key = Key::try_from_slice(&fs::read(&common.key)?)?;

            let start = Instant::now();
            let cipher = Cipher::new(&key);
            let (plaintext, aad) = cipher.open(mode, &ciphertext, padding)?;
            let duration = start.elapsed();

            fs::write(&common.output, &plaintext)?;

            if let Some(aad) = aad {
                let hex: String = aad.iter().map(|b| format!("{b:02x}")).collect();
                println!("AAD = {hex}");
            }

            println!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
    }
}

fn parse_aad(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    let mut digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();

    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }

    digits
        .chunks(2)
        .map(|pair| u8::from_str_radix(&pair.iter().collect::<String>(), 16))
        .collect()
}
