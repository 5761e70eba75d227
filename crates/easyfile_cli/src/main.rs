/* 📖 # What is the easyfile CLI for?

A thin shell over EasyFs so every handle operation can be exercised from a terminal:
path utilities (exists, size, wipe), text reads (cat, head), text writes (write,
append from stdin) and a binary block copy. It reads `easyfile.toml` from the
current directory if present.

Exit codes:
- 0: Success
- 1: Error (bad mode, missing file, I/O failure, invalid config)
*/

use std::env;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing::debug;

use easyfile_base::tracing::init_tracing;
use easyfile_base::{EasyFileResult, FilePath, PalHandle, RealPal, ResultExt};
use easyfile_core::config::CONFIG_FILE_NAME;
use easyfile_core::{EasyFs, load_config};

#[derive(Debug, Parser)]
#[command(name = "easyfile", version, about = "Mode-checked file access")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print whether a file can be opened for reading
    Exists { path: String },
    /// Print the size of a file in bytes
    Size { path: String },
    /// Truncate a file to zero length, creating it if needed
    Wipe { path: String },
    /// Print a text file
    Cat { path: String },
    /// Print the first lines of a text file
    Head {
        path: String,
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
    },
    /// Replace a file's content with stdin
    Write { path: String },
    /// Append stdin to a file
    Append { path: String },
    /// Copy a file through binary handles
    Copy {
        source: String,
        destination: String,
        #[arg(long, default_value_t = 4096)]
        block_size: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let current_dir = env::current_dir().unwrap_or_else(|e| {
        eprintln!("Error: Failed to get current directory: {}", e);
        process::exit(1);
    });
    let pal = PalHandle::new(RealPal::new(current_dir));

    let config = match load_config(&pal, &FilePath::from(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_tracing(config.log_filter.as_deref()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let fs = match EasyFs::with_config(pal, config) {
        Ok(fs) => fs,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = run(&fs, cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(fs: &EasyFs, command: Command) -> EasyFileResult<()> {
    debug!(?command, "running command");
    match command {
        Command::Exists { path } => {
            println!("{}", fs.exists(path.as_str()));
        }
        Command::Size { path } => {
            println!("{}", fs.size_of(path.as_str())?);
        }
        Command::Wipe { path } => {
            fs.wipe(path.as_str())?;
        }
        Command::Cat { path } => {
            let mut handle = fs.open_text(path.as_str(), "r")?;
            let mut buffer = Vec::new();
            handle.read_all(&mut buffer)?;
            emit(&buffer)?;
        }
        Command::Head { path, lines } => {
            let mut handle = fs.open_text(path.as_str(), "r")?;
            let mut buffer = Vec::new();
            for _ in 0..lines {
                let before = buffer.len();
                handle.read_line(&mut buffer)?;
                if buffer.len() == before {
                    break;
                }
            }
            emit(&buffer)?;
        }
        Command::Write { path } => {
            let input = read_stdin()?;
            let mut handle = fs.open_text(path.as_str(), "w")?;
            let written = handle.write(&input)?;
            report_written(written, input.len())?;
        }
        Command::Append { path } => {
            let input = read_stdin()?;
            let mut handle = fs.open_text(path.as_str(), "a")?;
            let written = handle.write(&input)?;
            report_written(written, input.len())?;
        }
        Command::Copy {
            source,
            destination,
            block_size,
        } => {
            let copied = copy(fs, &source, &destination, block_size)
                .with_context(|| format!("Failed to copy {} to {}", source, destination))?;
            println!("{}", copied);
        }
    }
    Ok(())
}

fn copy(fs: &EasyFs, source: &str, destination: &str, block_size: usize) -> EasyFileResult<u64> {
    let mut reader = fs.open_binary(source, "rb")?;
    let mut writer = fs.open_binary(destination, "wb")?;
    let block_size = block_size.max(1);
    let mut block = vec![0u8; block_size];
    let mut copied = 0u64;
    loop {
        let read = reader.read_records(&mut block, 1, block_size)?;
        if read == 0 {
            break;
        }
        let written = writer.write_records(&block, 1, read)?;
        copied += written as u64;
        if written < read {
            return Err(easyfile_base::err!(
                "Short write: {} of {} bytes accepted",
                written,
                read
            ));
        }
    }
    Ok(copied)
}

fn read_stdin() -> EasyFileResult<Vec<u8>> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .map_err(|e| easyfile_base::err!("Failed to read stdin: {}", e))?;
    Ok(input)
}

fn emit(bytes: &[u8]) -> EasyFileResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|_| stdout.flush())
        .map_err(|e| easyfile_base::err!("Failed to write stdout: {}", e))
}

fn report_written(written: usize, requested: usize) -> EasyFileResult<()> {
    if written < requested {
        return Err(easyfile_base::err!(
            "Short write: {} of {} bytes accepted",
            written,
            requested
        ));
    }
    debug!(written, "write complete");
    Ok(())
}
