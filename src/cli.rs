//! Command-line front end: `lzu8 compress` / `lzu8 decompress`.
//!
//! With no file arguments the tool is a stdin-to-stdout filter.  With file
//! arguments each file is processed independently (in parallel when there
//! is more than one), compressed files gaining a `.lzu8` extension and
//! decompressed files shedding it.
//!
//! Raw byte output streams block by block with flat memory use.  The text
//! encodings buffer the compressed bytes and wrap them in one piece, since
//! a Base64 stream cannot be split at arbitrary points and re-joined.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;

use crate::block::{Compressor, Decompressor};
use crate::config::{COMPRESSED_EXTENSION, DEFAULT_BLOCK_SIZE, MIN_BLOCK_SIZE};
use crate::encoding::{decode_compressed_bytes, encode_compressed_bytes, CompressedEncoding};
use crate::timefn::{throughput, Stopwatch};

// ─────────────────────────────────────────────────────────────────────────────
// Argument definitions
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "lzu8", version, about = "UTF-8-aware streaming LZ compressor")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Report sizes and throughput to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Compress files, or stdin to stdout.
    #[command(visible_alias = "c")]
    Compress {
        /// Input files; omit to read stdin.
        files: Vec<PathBuf>,

        /// Output path (single input only; defaults to INPUT.lzu8).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container format for the compressed bytes.
        #[arg(long, value_enum, default_value_t)]
        encoding: WireEncoding,

        /// Bytes handed to the compressor per streaming call.
        #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },
    /// Decompress files, or stdin to stdout.
    #[command(visible_alias = "d")]
    Decompress {
        /// Input files; omit to read stdin.
        files: Vec<PathBuf>,

        /// Output path (single input only; defaults to INPUT minus .lzu8).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Container format the input was wrapped in.
        #[arg(long, value_enum, default_value_t)]
        encoding: WireEncoding,

        /// Bytes handed to the decompressor per streaming call.
        #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
        block_size: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum WireEncoding {
    /// Raw compressed bytes.
    #[default]
    Raw,
    /// RFC 4648 Base64 text.
    Base64,
    /// 15-bits-per-code-unit packed text.
    BinaryString,
    /// Binary string shifted clear of low code points.
    Storage,
}

impl From<WireEncoding> for CompressedEncoding {
    fn from(e: WireEncoding) -> Self {
        match e {
            WireEncoding::Raw => CompressedEncoding::ByteArray,
            WireEncoding::Base64 => CompressedEncoding::Base64,
            WireEncoding::BinaryString => CompressedEncoding::BinaryString,
            WireEncoding::Storage => CompressedEncoding::StorageBinaryString,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

pub fn run(cli: Cli) -> Result<()> {
    let verbose = cli.verbose;
    match cli.command {
        Command::Compress { files, output, encoding, block_size } => {
            check_block_size(block_size)?;
            run_files(files, output, Mode::Compress, encoding.into(), block_size, verbose)
        }
        Command::Decompress { files, output, encoding, block_size } => {
            check_block_size(block_size)?;
            run_files(files, output, Mode::Decompress, encoding.into(), block_size, verbose)
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Compress,
    Decompress,
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size < MIN_BLOCK_SIZE {
        bail!("block size must be at least {MIN_BLOCK_SIZE} bytes");
    }
    Ok(())
}

fn run_files(
    files: Vec<PathBuf>,
    output: Option<PathBuf>,
    mode: Mode,
    encoding: CompressedEncoding,
    block_size: usize,
    verbose: bool,
) -> Result<()> {
    if files.is_empty() {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return process_stream(
            &mut stdin.lock(),
            &mut stdout.lock(),
            mode,
            encoding,
            block_size,
            verbose,
            "(stdin)",
        );
    }

    if output.is_some() && files.len() > 1 {
        bail!("--output cannot be combined with multiple input files");
    }

    // Independent streams allow running the files in parallel, one
    // compression context each.
    files.par_iter().try_for_each(|path| {
        let target = match &output {
            Some(out) => out.clone(),
            None => derive_output_path(path, mode)?,
        };
        let mut reader = File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        let mut writer = File::create(&target)
            .with_context(|| format!("cannot create {}", target.display()))?;
        process_stream(
            &mut reader,
            &mut writer,
            mode,
            encoding,
            block_size,
            verbose,
            &path.display().to_string(),
        )
    })
}

fn derive_output_path(input: &Path, mode: Mode) -> Result<PathBuf> {
    match mode {
        Mode::Compress => {
            let mut name = input.as_os_str().to_owned();
            name.push(".");
            name.push(COMPRESSED_EXTENSION);
            Ok(PathBuf::from(name))
        }
        Mode::Decompress => {
            if input.extension().and_then(|e| e.to_str()) != Some(COMPRESSED_EXTENSION) {
                bail!(
                    "{}: unknown suffix, use --output to name the result",
                    input.display()
                );
            }
            Ok(input.with_extension(""))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream processing
// ─────────────────────────────────────────────────────────────────────────────

fn process_stream(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    mode: Mode,
    encoding: CompressedEncoding,
    block_size: usize,
    verbose: bool,
    label: &str,
) -> Result<()> {
    let sw = Stopwatch::start();
    let (bytes_in, bytes_out) = match mode {
        Mode::Compress => compress_stream(reader, writer, encoding, block_size)?,
        Mode::Decompress => decompress_stream(reader, writer, encoding, block_size)?,
    };
    writer.flush().context("flushing output")?;

    if verbose {
        let secs = sw.elapsed_secs();
        let ratio = if bytes_in > 0 {
            bytes_out as f64 * 100.0 / bytes_in as f64
        } else {
            0.0
        };
        eprintln!(
            "lzu8: {label}: {bytes_in} -> {bytes_out} bytes ({ratio:.1}%), {}",
            throughput(bytes_in, secs)
        );
    }
    Ok(())
}

fn compress_stream(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    encoding: CompressedEncoding,
    block_size: usize,
) -> Result<(usize, usize)> {
    let mut compressor = Compressor::new();
    let mut chunk = vec![0u8; block_size];
    let mut bytes_in = 0usize;
    let mut bytes_out = 0usize;
    // Text wrappers cannot be emitted piecemeal; collect first.
    let mut collected: Vec<u8> = Vec::new();

    loop {
        let n = read_block(reader, &mut chunk)?;
        if n == 0 {
            break;
        }
        bytes_in += n;
        let compressed = compressor.compress_block(&chunk[..n]);
        if encoding == CompressedEncoding::ByteArray {
            bytes_out += compressed.len();
            writer.write_all(&compressed).context("writing output")?;
        } else {
            collected.extend_from_slice(&compressed);
        }
    }

    if encoding != CompressedEncoding::ByteArray {
        let wrapped = encode_compressed_bytes(&collected, encoding);
        bytes_out = wrapped.len();
        writer.write_all(&wrapped).context("writing output")?;
    }
    Ok((bytes_in, bytes_out))
}

fn decompress_stream(
    reader: &mut dyn Read,
    writer: &mut dyn Write,
    encoding: CompressedEncoding,
    block_size: usize,
) -> Result<(usize, usize)> {
    let mut decompressor = Decompressor::new();
    let mut bytes_in = 0usize;
    let mut bytes_out = 0usize;

    if encoding == CompressedEncoding::ByteArray {
        // The decompressor tolerates splits at any byte offset, so raw
        // input streams straight through.
        let mut chunk = vec![0u8; block_size];
        loop {
            let n = read_block(reader, &mut chunk)?;
            if n == 0 {
                break;
            }
            bytes_in += n;
            let produced = decompressor.decompress_block(&chunk[..n])?;
            bytes_out += produced.len();
            writer.write_all(&produced).context("writing output")?;
        }
    } else {
        let mut wrapped = Vec::new();
        reader.read_to_end(&mut wrapped).context("reading input")?;
        bytes_in = wrapped.len();
        let compressed = decode_compressed_bytes(&wrapped, encoding)?;
        for piece in compressed.chunks(block_size) {
            let produced = decompressor.decompress_block(piece)?;
            bytes_out += produced.len();
            writer.write_all(&produced).context("writing output")?;
        }
    }

    // Carry-over state at end of input means the stream was cut mid-token
    // or mid-character; writing a silently shortened result would hide it.
    if decompressor.has_pending() {
        bail!("truncated compressed input");
    }
    Ok((bytes_in, bytes_out))
}

/// Read until the buffer is full or the stream ends.  Pipes hand out short
/// reads; a plain `read` would shrink the effective block size.
fn read_block(reader: &mut dyn Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading input"),
        }
    }
    Ok(filled)
}
