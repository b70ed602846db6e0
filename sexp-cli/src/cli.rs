//! Command-line parser for sexp.

use clap::{App, Arg};

pub fn build() -> App<'static, 'static> {
    configure(App::new("sexp"))
}

/// Defines the CLI.
pub fn configure(app: App<'static, 'static>) -> App<'static, 'static> {
    app.version(env!("CARGO_PKG_VERSION"))
        .about("Reads s-expressions and prints them in canonical, base64 or advanced form")
        .arg(Arg::with_name("advanced")
             .short("a").long("advanced")
             .help("Prints in advanced form"))
        .arg(Arg::with_name("base64")
             .short("b").long("base64")
             .help("Prints in base64 transport form"))
        .arg(Arg::with_name("canonical")
             .short("c").long("canonical")
             .help("Prints in canonical form (the default)"))
        .arg(Arg::with_name("width")
             .short("l").long("width").value_name("WIDTH")
             .default_value("75")
             .help("Breaks lines before this column, 0 for no limit"))
        .arg(Arg::with_name("max-depth")
             .long("max-depth").value_name("N")
             .default_value("1024")
             .help("Rejects lists nested deeper than this, 0 for no limit"))
        .arg(Arg::with_name("strict")
             .long("strict")
             .help("Treats warnings as errors"))
        .arg(Arg::with_name("string")
             .short("s").long("string")
             .conflicts_with_all(&["extended-key", "repeat"])
             .help("Reads the whole input as a single string"))
        .arg(Arg::with_name("extended-key")
             .short("k").long("extended-key")
             .conflicts_with("repeat")
             .help("Reads an extended private key file and prints its \
                    fields before the key"))
        .arg(Arg::with_name("repeat")
             .short("x").long("repeat")
             .help("Keeps reading objects until the end of the input"))
        .arg(Arg::with_name("input")
             .short("i").long("input").value_name("FILE")
             .help("Sets the input file to use"))
        .arg(Arg::with_name("output")
             .short("o").long("output").value_name("FILE")
             .help("Sets the output file to use"))
}
