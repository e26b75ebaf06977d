mod cmd;

use std::env;
use std::process;

use lessify::Pager;

use cmd::cli;

fn main() {
    let args = match cli::Args::build_from_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("fatal: {err}.");
            println!("Try '{bin} -h' for help.", bin = env!("CARGO_BIN_NAME"));
            process::exit(2);
        }
    };

    if args.long_help {
        long_help();
    } else if args.short_help {
        short_help();
    } else if args.version {
        version();
    } else if let Some(command) = &args.command {
        let result = match command {
            cli::Command::GenKey => cmd::genkey(&args),
            cli::Command::Encrypt => cmd::encrypt(&args),
            cli::Command::Decrypt => cmd::decrypt(&args),
            cli::Command::ListKeys => cmd::list_keys(),
        };
        if let Err(code) = result {
            process::exit(code);
        }
    } else {
        // No arguments.
        short_help();
    }
}

fn short_help() {
    println!("{}", short_help_message());
    println!(
        "For full help, see `{bin} --help`.",
        bin = env!("CARGO_BIN_NAME")
    );
}

fn short_help_message() -> String {
    format!(
        "\
{description}

Usage: {bin} [<options>] <command> [<args>]

Commands:
  genkey                 Generate a keypair and write it to public_keys/ and private_key/
  encrypt                Encrypt and sign a message for a recipient
  decrypt                Decrypt a message and verify its signature
  list-keys              List known public keys and their fingerprints

Options:
  -h, --help             Show this message and exit
  -V, --version          Show the version and exit
",
        description = env!("CARGO_PKG_DESCRIPTION"),
        bin = env!("CARGO_BIN_NAME"),
    )
}

#[allow(clippy::too_many_lines)]
fn long_help() {
    Pager::page_or_print(&format!(
        "\
{help}
genkey:
  {bin} genkey --owner <name> --email <address>
      Generates a fresh keypair, writing the public half to
      public_keys/<name>.asc and the private half to
      private_key/private.asc (overwriting any existing private key).

encrypt:
  {bin} encrypt --recipient <name> [--armor] [--in <file>] [--out <file>]
      Reads public_keys/<name>.asc and private_key/private.asc, encrypts
      the input to the recipient and signs it as the local identity.
      Reads from stdin and writes to stdout unless --in/--out are given.
      --armor wraps the output in text armor instead of emitting raw bytes.

decrypt:
  {bin} decrypt --sender <name> [--in <file>] [--out <file>]
      Reads public_keys/<name>.asc and private_key/private.asc, decrypts
      the input and verifies it was signed by the named sender. Accepts
      both armored and raw input. Prints a warning to stderr, but still
      writes the plaintext, if verification fails.

list-keys:
  {bin} list-keys
      Lists every public_keys/*.asc file with its name, email, and a
      colon-hex SHA3-512 fingerprint.

What does {package} do?
  {package} encrypts a message to a recipient's public key and signs it
  with the sender's private key, producing a self-contained envelope
  that can be stored or transmitted as raw bytes or as text armor.
",
        help = short_help_message(),
        bin = env!("CARGO_BIN_NAME"),
        package = env!("CARGO_PKG_NAME"),
    ));
}

fn version() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
}
