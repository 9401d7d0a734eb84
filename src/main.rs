use std::env;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use display_id::{
    format_display_id, format_display_id_for_ui, generate_display_id, parse_display_id,
    unformat_display_id, validate_display_id,
};
use serde_json::json;

#[derive(Debug, Clone, Default)]
struct FormatOpts {
    prefix: Option<String>,
    ui: bool,
}

fn print_help() {
    eprintln!(
        "display-id - display identifier generator CLI\n\n\
Usage:\n  display-id next\n  display-id stream [--count <n>]\n  display-id validate <id>\n  display-id parse <id> [--json]\n  display-id format <id> [--prefix <p>] [--ui]\n  display-id unformat <display>\n  display-id healthcheck [--json]\n  display-id bench [--count <n>]\n  display-id selftest\n\
For stream: --count 0 means infinite stream\n"
    );
}

fn parse_count_flag(args: &[String]) -> Result<usize, String> {
    let mut count = 0usize;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --count".to_string());
                }
                count = args[i + 1]
                    .parse::<usize>()
                    .map_err(|_| "invalid integer for --count".to_string())?;
                i += 2;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    Ok(count)
}

fn parse_format_flags(args: &[String]) -> Result<FormatOpts, String> {
    let mut opts = FormatOpts::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--prefix" => {
                if i + 1 >= args.len() {
                    return Err("missing value for --prefix".to_string());
                }
                opts.prefix = Some(args[i + 1].clone());
                i += 2;
            }
            "--ui" => {
                opts.ui = true;
                i += 1;
            }
            _ => return Err(format!("unknown flag: {}", args[i])),
        }
    }

    Ok(opts)
}

fn run_next() -> Result<(), String> {
    println!("{}", generate_display_id());
    Ok(())
}

fn run_stream(args: &[String]) -> Result<(), String> {
    let count = parse_count_flag(args)?;
    let mut emitted = 0usize;

    loop {
        if count > 0 && emitted >= count {
            break;
        }
        println!("{}", generate_display_id());
        io::stdout().flush().map_err(|e| e.to_string())?;
        emitted += 1;
    }

    Ok(())
}

fn run_validate(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("validate requires an id".to_string());
    }

    let ok = validate_display_id(&args[0]);
    println!("{}", if ok { "true" } else { "false" });
    if ok {
        Ok(())
    } else {
        Err("invalid display id".to_string())
    }
}

fn run_parse(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("parse requires an id".to_string());
    }

    let id = &args[0];
    let mut json_out = false;
    for arg in &args[1..] {
        if arg == "--json" {
            json_out = true;
        } else {
            return Err(format!("unknown flag: {arg}"));
        }
    }

    let parsed = parse_display_id(id).map_err(|e| e.to_string())?;
    if json_out {
        println!(
            "{}",
            serde_json::to_string(&parsed).map_err(|e| e.to_string())?
        );
    } else {
        println!("raw={}", parsed.raw);
        println!("window_offset={}", parsed.window_offset);
        println!("random={}", parsed.random);
        println!("timestamp={}", parsed.timestamp.to_rfc3339());
    }

    Ok(())
}

fn run_format(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("format requires an id".to_string());
    }

    let opts = parse_format_flags(&args[1..])?;
    let out = if opts.ui {
        format_display_id_for_ui(&args[0], opts.prefix.as_deref())
    } else {
        format_display_id(&args[0], opts.prefix.as_deref())
    };
    println!("{out}");
    Ok(())
}

fn run_unformat(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("unformat requires a formatted id".to_string());
    }
    println!("{}", unformat_display_id(&args[0]));
    Ok(())
}

fn run_healthcheck(args: &[String]) -> Result<(), String> {
    let mut json_mode = false;
    for arg in args {
        if arg == "--json" {
            json_mode = true;
        } else {
            return Err(format!("unknown flag: {arg}"));
        }
    }

    let sample = generate_display_id();
    let ok = validate_display_id(&sample);

    if json_mode {
        let payload = json!({
            "ok": ok,
            "sample_id": sample,
        });
        println!(
            "{}",
            serde_json::to_string(&payload).map_err(|e| e.to_string())?
        );
    } else {
        println!(
            "ok={} sample={}",
            if ok { "true" } else { "false" },
            sample
        );
    }

    if ok {
        Ok(())
    } else {
        Err("healthcheck failed".to_string())
    }
}

fn run_bench(args: &[String]) -> Result<(), String> {
    let mut count = parse_count_flag(args)?;
    if count == 0 {
        count = 100_000;
    }

    let start = Instant::now();
    for _ in 0..count {
        let _ = generate_display_id();
    }
    let secs = start.elapsed().as_secs_f64().max(1e-9);
    let ips = count as f64 / secs;

    let payload = json!({
        "n": count,
        "seconds": secs,
        "ids_per_sec": ips,
    });
    println!(
        "{}",
        serde_json::to_string(&payload).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn run_selftest() -> Result<(), String> {
    let id = generate_display_id();
    if !validate_display_id(&id) {
        return Err("selftest failed: generated id did not validate".to_string());
    }
    let parsed = parse_display_id(&id).map_err(|e| format!("selftest failed: {e}"))?;
    if parsed.raw != id {
        return Err("selftest failed: parse did not round-trip".to_string());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        print_help();
        process::exit(2);
    }

    if args[0] == "-h" || args[0] == "--help" || args[0] == "help" {
        print_help();
        return;
    }

    let cmd = args[0].as_str();
    let rest = &args[1..];

    let res = match cmd {
        "next" => run_next(),
        "stream" => run_stream(rest),
        "validate" => run_validate(rest),
        "parse" => run_parse(rest),
        "format" => run_format(rest),
        "unformat" => run_unformat(rest),
        "healthcheck" => run_healthcheck(rest),
        "bench" => run_bench(rest),
        "selftest" => run_selftest(),
        _ => Err(format!("unknown command: {}", cmd)),
    };

    if let Err(err) = res {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
