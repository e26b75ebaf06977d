#[derive(Debug, Eq, PartialEq)]
pub enum Command {
    GenKey,
    Encrypt,
    Decrypt,
    ListKeys,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Args {
    pub command: Option<Command>,
    pub short_help: bool,
    pub long_help: bool,
    pub version: bool,
    /// `genkey`: display name to embed in the new keyfiles.
    pub owner: Option<String>,
    /// `genkey`: email to embed in the new keyfiles.
    pub email: Option<String>,
    /// `encrypt`: peer whose `public_keys/<name>.asc` to encrypt to.
    pub recipient: Option<String>,
    /// `decrypt`: peer whose `public_keys/<name>.asc` to verify against.
    pub sender: Option<String>,
    /// `encrypt`: emit text-armored output instead of raw bytes.
    pub armor: bool,
    pub input: Option<String>,
    pub output: Option<String>,
}

impl Args {
    pub fn build_from_args<I>(mut cli_args: I) -> Result<Self, String>
    where
        I: Iterator<Item: AsRef<str> + ToString>,
    {
        let mut args = Self::default();

        #[allow(clippy::while_let_on_iterator)] // Need it for options with values.
        while let Some(arg) = cli_args.next() {
            let some_command = args.command.is_some();

            match arg.as_ref() {
                "genkey" if !some_command => args.command = Some(Command::GenKey),
                "encrypt" if !some_command => args.command = Some(Command::Encrypt),
                "decrypt" if !some_command => args.command = Some(Command::Decrypt),
                "list-keys" if !some_command => args.command = Some(Command::ListKeys),
                "-h" => args.short_help = true,
                "--help" => args.long_help = true,
                "-V" | "--version" => args.version = true,
                "-a" | "--armor" => args.armor = true,
                "-o" | "--owner" => {
                    args.owner = Some(next_value(&mut cli_args, "--owner")?);
                }
                "-e" | "--email" => {
                    args.email = Some(next_value(&mut cli_args, "--email")?);
                }
                "-r" | "--recipient" => {
                    args.recipient = Some(next_value(&mut cli_args, "--recipient")?);
                }
                "-s" | "--sender" => {
                    args.sender = Some(next_value(&mut cli_args, "--sender")?);
                }
                "-i" | "--in" => {
                    args.input = Some(next_value(&mut cli_args, "--in")?);
                }
                "-O" | "--out" => {
                    args.output = Some(next_value(&mut cli_args, "--out")?);
                }
                unknown => {
                    return Err(format!("Unknown argument: '{unknown}'"));
                }
            }
        }

        Ok(args)
    }
}

fn next_value<I>(cli_args: &mut I, option: &str) -> Result<String, String>
where
    I: Iterator<Item: AsRef<str> + ToString>,
{
    cli_args
        .next()
        .map(|v| v.to_string())
        .ok_or_else(|| format!("Missing value for '{option}'"))
}
