#![forbid(unsafe_code)]

//! `tripick` binary: replay an input script against a picker and print the
//! transcript plus the final view.

use std::io::{self, Read};
use std::process;

use tripick_harness::cli::Opts;
use tripick_harness::{Script, ScriptedHost};
use tripick_widgets::date_picker::{PickerConfig, PickerOptions};

fn main() {
    let opts = Opts::parse();
    init_logging();

    let parsed = PickerConfig::from_env_with(|key| std::env::var(key).ok());
    for error in &parsed.errors {
        eprintln!("tripick: ignoring {error}");
    }

    let today = opts
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let options = PickerOptions::new(opts.mode, today)
        .with_value(opts.value)
        .with_bounds(opts.bounds)
        .clearable(opts.clearable)
        .disabled(opts.disabled)
        .with_config(parsed.config);

    let text = match read_script(opts.script.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("tripick: failed to read script: {e}");
            process::exit(1);
        }
    };
    let script = match Script::parse(&text) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("tripick: {e}");
            process::exit(2);
        }
    };

    let mut host = ScriptedHost::new(options);
    tracing::info!(steps = script.len(), mode = opts.mode.as_str(), "replaying script");
    let transcript = host.run(&script);

    if opts.json {
        let mut out = transcript.to_json();
        if opts.show_view {
            out["view"] = serde_json::Value::String(host.view_text());
        }
        match serde_json::to_string_pretty(&out) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("tripick: failed to encode transcript: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", transcript.to_text());
        if opts.show_view {
            println!();
            print!("{}", host.view_text());
        }
    }
}

fn read_script(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(feature = "tracing-json")]
fn init_logging() {
    let _ = tripick_core::logging::init_json_subscriber();
}

#[cfg(not(feature = "tracing-json"))]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
