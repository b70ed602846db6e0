//! A command-line front end for the s-expression codec.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};

use anyhow::{anyhow, bail, Context as _, Result};
use clap::ArgMatches;
use log::info;

use sexp::{ExtendedPrivateKey, InputStream, Options, OutputStream, PrintMode, Sexp};

mod cli;

fn open_or_stdin(f: Option<&str>) -> Result<Box<dyn Read>> {
    match f {
        Some(f) if f != "-" => Ok(Box::new(File::open(f)
                                           .context("Failed to open input file")?)),
        _ => Ok(Box::new(io::stdin())),
    }
}

fn create_or_stdout(f: Option<&str>) -> Result<Box<dyn Write>> {
    match f {
        Some(f) if f != "-" => Ok(Box::new(OpenOptions::new()
                                           .write(true)
                                           .truncate(true)
                                           .create(true)
                                           .open(f)
                                           .context("Failed to create output file")?)),
        _ => Ok(Box::new(io::stdout())),
    }
}

fn number_of(m: &ArgMatches, name: &str) -> Result<usize> {
    let value = m.value_of(name)
        .ok_or_else(|| anyhow!("--{} is missing", name))?;
    value.parse()
        .with_context(|| format!("--{} expects a number, got {:?}", name, value))
}

fn options_of(m: &ArgMatches) -> Result<Options> {
    Ok(Options::default()
       .max_column(number_of(m, "width")?)
       .max_depth(number_of(m, "max-depth")?)
       .warnings_are_errors(m.is_present("strict")))
}

/// The forms to print each object in, canonical if none is asked for.
fn modes_of(m: &ArgMatches) -> Vec<PrintMode> {
    let modes: Vec<PrintMode> = [
        ("canonical", PrintMode::Canonical),
        ("base64", PrintMode::Base64),
        ("advanced", PrintMode::Advanced),
    ]
        .iter()
        .filter(|(name, _)| m.is_present(name))
        .map(|&(_, mode)| mode)
        .collect();
    if modes.is_empty() {
        vec![PrintMode::Canonical]
    } else {
        modes
    }
}

fn print<W: Write>(os: &mut OutputStream<W>, object: &Sexp, modes: &[PrintMode])
                   -> Result<()> {
    for mode in modes {
        match mode {
            PrintMode::Canonical => os.print_canonical(object)?,
            PrintMode::Base64 => os.print_base64(object)?,
            PrintMode::Advanced => os.print_advanced(object)?,
        }
        // Outside of any list this is a bare line break.
        os.new_line(PrintMode::Advanced)?;
    }
    Ok(())
}

/// Writes a field so that it reads back as `value`, or fails if no
/// field can.
fn write_field(sink: &mut dyn Write, name: &str, value: &str) -> Result<()> {
    if value.contains('\r') {
        bail!("Field {} holds a carriage return", name);
    }
    if value.split('\n').skip(1).any(|line| line.starts_with('#')) {
        bail!("Field {} holds a line starting with '#'", name);
    }

    write!(sink, "{}:", name)?;
    for (i, line) in value.split('\n').enumerate() {
        match (i, line.is_empty()) {
            (0, true) => (),
            // Blanks after the colon are skipped, so keep them on a
            // continuation line.
            (0, false) if line.starts_with(|c| c == ' ' || c == '\t') => {
                write!(sink, "\n {}", line)?
            }
            (0, false) => write!(sink, " {}", line)?,
            (_, true) => write!(sink, "\n ")?,
            (_, false) => write!(sink, "\n \n {}", line)?,
        }
    }
    writeln!(sink)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli::build().get_matches();
    let options = options_of(&matches)?;
    let modes = modes_of(&matches);

    let input = BufReader::new(open_or_stdin(matches.value_of("input"))?);
    let mut output = BufWriter::new(create_or_stdout(matches.value_of("output"))?);

    if matches.is_present("extended-key") {
        let record = ExtendedPrivateKey::parse(input, options)
            .context("Failed to parse extended private key")?;
        for (name, value) in record.fields() {
            write_field(&mut output, name, value)?;
        }
        let mut os = OutputStream::new(output, options);
        print(&mut os, record.key(), &modes)?;
        os.flush()?;
        return Ok(());
    }

    let mut stream = InputStream::new(input, options);
    let mut os = OutputStream::new(output, options);
    if matches.is_present("string") {
        let object = stream.scan_to_eof()?;
        print(&mut os, &object, &modes)?;
    } else if matches.is_present("repeat") {
        let mut count = 0;
        while !stream.at_eof()? {
            let object = stream.scan_object()
                .with_context(|| format!("Failed to parse object {}", count + 1))?;
            print(&mut os, &object, &modes)?;
            count += 1;
        }
        info!("Read {} objects", count);
    } else {
        let object = stream.scan_object().context("Failed to parse input")?;
        print(&mut os, &object, &modes)?;
    }
    if !stream.warnings().is_empty() {
        info!("{} warnings", stream.warnings().len());
    }
    os.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        cli::build().get_matches_from(std::iter::once("sexp").chain(args.iter().copied()))
    }

    #[test]
    fn test_options() {
        let options = options_of(&matches(&[])).unwrap();
        assert_eq!(Options::default(), options);

        let options = options_of(&matches(&["-l", "20", "--max-depth", "8", "--strict"])).unwrap();
        assert_eq!(Options::default().max_column(20).max_depth(8).warnings_are_errors(true),
                   options);

        assert!(options_of(&matches(&["--width", "wide"])).is_err());
    }

    #[test]
    fn test_modes() {
        assert_eq!(vec![PrintMode::Canonical], modes_of(&matches(&[])));
        assert_eq!(vec![PrintMode::Base64, PrintMode::Advanced],
                   modes_of(&matches(&["-a", "-b"])));
    }

    #[test]
    fn test_print() {
        let object = sexp::from_bytes(b"(3:foo3:bar)").unwrap();
        let mut os = OutputStream::new(Vec::new(), Options::default());
        print(&mut os, &object,
              &[PrintMode::Canonical, PrintMode::Base64, PrintMode::Advanced]).unwrap();
        assert_eq!(&b"(3:foo3:bar)\n{KDM6Zm9vMzpiYXIp}\n(foo bar)\n"[..],
                   os.into_inner().as_slice());
    }

    #[test]
    fn test_field_reads_back() {
        for value in ["plain", "", "two\nlines", "gap\n\nhere", "end\n",
                      " lead", "\tlead\nx", "a#b", "#first", "a\n b"] {
            let mut file = Vec::new();
            write_field(&mut file, "Label", value).unwrap();
            file.extend_from_slice(b"Key: (a)\n");
            let record = ExtendedPrivateKey::from_bytes(&file).unwrap();
            assert_eq!(Some(value), record.get("label"));
        }
    }

    #[test]
    fn test_field_that_cannot_read_back() {
        for value in ["a\n#b", "a\rb", "a\r\nb"] {
            let mut file = Vec::new();
            assert!(write_field(&mut file, "Label", value).is_err());
            assert!(file.is_empty());
        }
    }
}
