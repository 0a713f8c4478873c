//! Interactive reader: reads one expression per line from stdin and prints it back.
//!
//! ```ignore
//! <input.lisp lisplet
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=lisplet=trace`) to see them.

fn main() -> std::io::Result<()> {
    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    lisplet::repl(&mut stdin, &mut stdout)
}
